//! HTML pages for the form-based replies view.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::replies::{Reply, preview};

fn back_link(frontend_url: &str) -> String {
    format!(
        r#"<a href="{}">Back to frontend</a>"#,
        encode_double_quoted_attribute(frontend_url)
    )
}

/// Debug landing page with a login button.
#[must_use]
pub fn home_page(frontend_url: &str, start_path: &str) -> String {
    format!(
        r#"
    <h2>Backend API running</h2>
    <p>Frontend: <a href="{frontend}" style="color:blue;font-size:20px;">{frontend_text}</a></p>
    <hr>
    <a href="{start}" style="background:#4CAF50;color:white;padding:10px;text-decoration:none;border-radius:5px;">Log in with Threads (debug)</a>
    "#,
        frontend = encode_double_quoted_attribute(frontend_url),
        frontend_text = encode_text(frontend_url),
        start = encode_double_quoted_attribute(start_path),
    )
}

#[must_use]
pub fn login_prompt(frontend_url: &str, start_path: &str) -> String {
    format!(
        r#"
    <h3>Please log in first</h3>
    <a href="{start}">Log in with Threads</a>
    <br><br>
    {back}
    "#,
        start = encode_double_quoted_attribute(start_path),
        back = back_link(frontend_url),
    )
}

#[must_use]
pub fn api_error(frontend_url: &str, detail: &str) -> String {
    format!(
        r#"
    <h3>API call failed</h3>
    <pre>{}</pre>
    {}
    "#,
        encode_text(detail),
        back_link(frontend_url),
    )
}

#[must_use]
pub fn no_results(frontend_url: &str) -> String {
    format!(
        r#"
    <h3>No replies found</h3>
    {}
    "#,
        back_link(frontend_url)
    )
}

/// Result list: one link per reply, labelled with its id and first five words.
#[must_use]
pub fn results(frontend_url: &str, replies: &[Reply], limit: u32, keywords: &str) -> String {
    let items: String = replies
        .iter()
        .map(|reply| {
            let media_id = reply.id.as_deref().unwrap_or_default();
            let permalink = reply.permalink.as_deref().unwrap_or_default();
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" style="display: block; margin-bottom: 10px; padding: 8px; border: 1px solid #ccc; border-radius: 4px; text-decoration: none; color: #333;"><strong>{}</strong> - {}</a>"#,
                encode_double_quoted_attribute(permalink),
                encode_text(media_id),
                encode_text(&preview(reply.text())),
            )
        })
        .collect();

    let keywords = if keywords.is_empty() {
        "none".into()
    } else {
        encode_text(keywords).into_owned()
    };

    format!(
        r#"
    <h3>Found {count} result(s)</h3>
    <div>{items}</div>
    <hr>
    <p>Limit: {limit} | Keywords: {keywords}</p>
    {back}
    "#,
        count = replies.len(),
        back = back_link(frontend_url),
    )
}
