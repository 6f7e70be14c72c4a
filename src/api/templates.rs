// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML for the single upload page and the error page

use axum::http::StatusCode;

/// Path of the display route for an uploaded file
pub fn display_path(filename: &str) -> String {
    format!("/display/{}", encode_segment(filename))
}

/// Path under which the static file service exposes an upload
pub fn static_upload_path(filename: &str) -> String {
    format!("/static/uploads/{}", encode_segment(filename))
}

/// Percent-encode one path segment
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Message text as HTML: sanitized, line breaks preserved
fn message_html(message: &str) -> String {
    ammonia::clean(message).replace('\n', "<br>")
}

/// The upload form, any flashed messages, and the uploaded image if there is one
pub fn render_upload_page(messages: &[String], filename: Option<&str>) -> String {
    let flashes = if messages.is_empty() {
        String::new()
    } else {
        let items: String = messages
            .iter()
            .map(|m| format!("        <li>{}</li>\n", message_html(m)))
            .collect();
        format!("    <ul class=\"flashes\">\n{}    </ul>\n", items)
    };

    let image = filename
        .map(|name| {
            format!(
                "    <div class=\"result\">\n        <img src=\"{}\" alt=\"uploaded image\">\n    </div>\n",
                display_path(name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Dog Breed Classifier</title>
</head>
<body>
    <h2>Select a file to upload</h2>
{flashes}{image}    <form method="post" action="/" enctype="multipart/form-data">
        <input type="file" name="file" autocomplete="off" required>
        <input type="submit" value="Submit">
    </form>
</body>
</html>
"#
    )
}

pub fn render_error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{status}</title>
</head>
<body>
    <h1>{status}</h1>
    <p>{}</p>
    <p><a href="/">Back</a></p>
</body>
</html>
"#,
        message_html(message)
    )
}
