use pulldown_cmark::{html, Event as MdEvent, Options, Parser};
use yew::{AttrValue, Html};

pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Render message markdown (bold/italic/inline code and friends). Soft breaks
/// become hard breaks so single newlines in replies stay visible, the way the
/// backend formats them.
pub fn render_markdown(text: &str) -> Html {
    let parser = Parser::new_ext(text, Options::empty()).map(|event| match event {
        MdEvent::SoftBreak => MdEvent::HardBreak,
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let styled_html = format!(r#"<div class="markdown-body">{}</div>"#, html_output);
    Html::from_html_unchecked(AttrValue::from(styled_html))
}
