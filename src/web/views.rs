use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::download::{DownloadLink, DOWNLOAD_TEXT};

pub const PAGE_TITLE: &str = "Question Table Generator";
pub const SUCCESS_MESSAGE: &str = "Document generated successfully!";

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; font-family: ui-monospace, monospace; box-sizing: border-box; }
button { margin-top: .75rem; padding: .5rem 1.25rem; }
.notice { margin-top: 1rem; padding: .75rem 1rem; border-radius: .25rem; }
.notice.success { background: #e6f4ea; color: #1e4620; }
.notice.error { background: #fdecea; color: #611a15; }
"#;

/// Outcome of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(DownloadLink),
    Error(String),
}

fn notice(notice: &Notice) -> Markup {
    match notice {
        Notice::Success(link) => html! {
            div.notice.success role="status" {
                p { (SUCCESS_MESSAGE) }
                p {
                    a href=(link.href) download=(link.file_name) { (DOWNLOAD_TEXT) }
                }
            }
        },
        Notice::Error(message) => html! {
            div.notice.error role="alert" { (message) }
        },
    }
}

/// The whole single-page form. `input` is echoed back into the textarea.
pub fn page(input: &str, result: Option<&Notice>) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (PAGE_TITLE) }
            style { (PreEscaped(CSS)) }
        }

        body {
            main {
                h1 { (PAGE_TITLE) }
                h3 { "Paste the JSON data below to generate the Google Doc-style output" }

                form method="post" action="/generate" {
                    label for="json" { "Enter JSON Data:" }
                    textarea id="json" name="json" rows="18" { (input) }
                    button type="submit" { "Generate Document" }
                }

                @if let Some(result) = result {
                    (notice(result))
                }
            }
        }
    }
}
