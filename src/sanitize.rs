/// Sanitize rendered HTML with ammonia's default policy, additionally keeping
/// the code-fence language class and legacy cell alignment the later passes
/// consume.
pub fn sanitize(html: &str) -> String {
    ammonia::Builder::default()
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("th", &["align"])
        .add_tag_attributes("td", &["align"])
        .clean(html)
        .to_string()
}
