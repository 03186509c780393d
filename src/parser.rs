use pulldown_cmark::{Alignment, CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Render normalized markdown to HTML.
///
/// GitHub-flavored tables and task lists are enabled, strikethrough is not,
/// and every soft line break becomes a hard break.
pub fn render(markdown: &str) -> String {
    let mut state = RenderState::default();
    let events = Parser::new_ext(markdown, options()).map(|event| process_event(event, &mut state));

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Extensions shared by rendering and by the preprocessor's code scan.
pub(crate) fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_GFM);
    options
}

#[derive(Default)]
struct RenderState {
    // Column alignments of the table being rendered
    alignments: Vec<Alignment>,
    in_table_head: bool,
    cell_index: usize,
}

impl RenderState {
    fn cell_tag(&self) -> &'static str {
        if self.in_table_head { "th" } else { "td" }
    }
}

fn process_event<'a>(event: Event<'a>, state: &mut RenderState) -> Event<'a> {
    match event {
        Event::SoftBreak => Event::HardBreak,

        // Task list checkboxes would be stripped by the sanitizer
        Event::TaskListMarker(checked) => {
            Event::Text(CowStr::Borrowed(if checked { "☑ " } else { "☐ " }))
        }

        // Tables: cells carry the legacy `align` attribute so alignment
        // survives sanitization and reaches the alignment transfer
        Event::Start(Tag::Table(ref alignments)) => {
            state.alignments = alignments.clone();
            event
        }
        Event::Start(Tag::TableHead) => {
            state.in_table_head = true;
            state.cell_index = 0;
            event
        }
        Event::End(TagEnd::TableHead) => {
            state.in_table_head = false;
            event
        }
        Event::Start(Tag::TableRow) => {
            state.cell_index = 0;
            event
        }
        Event::Start(Tag::TableCell) => {
            let tag = state.cell_tag();
            let align = match state.alignments.get(state.cell_index) {
                Some(Alignment::Left) => " align=\"left\"",
                Some(Alignment::Center) => " align=\"center\"",
                Some(Alignment::Right) => " align=\"right\"",
                Some(Alignment::None) | None => "",
            };
            Event::InlineHtml(format!("<{tag}{align}>").into())
        }
        Event::End(TagEnd::TableCell) => {
            let tag = state.cell_tag();
            state.cell_index += 1;
            Event::InlineHtml(format!("</{tag}>").into())
        }

        _ => event,
    }
}
