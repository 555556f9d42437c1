use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use webtoon_core::{Episode, SeriesId};

use crate::persist::{AtomicFileWriter, PersistError};

const INDEX_HEAD: &str = r#"<html>
<head>
    <meta charset="utf-8">
    <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.2/css/bootstrap.min.css">
    <style>
        body {
            padding-top: 10px;
        }
        img {
            height: 34px;
        }
        .table>tbody>tr>td, .table>tbody>tr>th, .table>tfoot>tr>td, .table>tfoot>tr>th, .table>thead>tr>td, .table>thead>tr>th {
            font-size: 11px;
            height: 34px;
            line-height: 34px;
        }
        .table>thead>tr>td, .table>thead>tr>th {
            height: 20px;
            line-height: 20px;
            text-align: center;
        }
    </style>
</head>
<body>
<div class="container">
<table class="table table-stripped">
<colgroup>
    <col width="99">
    <col width="*">
    <col width="141">
    <col width="76">
</colgroup>
<thead>
    <tr>
        <th>이미지</th>
        <th>제목</th>
        <th>별점</th>
        <th>등록일</th>
    </tr>
</thead>
"#;

const INDEX_TAIL: &str = "</table>\n</div>\n</body>\n</html>\n";

/// Build the static index page for one series, newest episode first.
///
/// Thumbnail cells reference the sibling download directory rather than the
/// remote image host, so the page works offline once thumbnails are saved.
pub fn render_index(series: SeriesId, episodes: &[Episode], generated_utc: &str) -> String {
    let mut html = String::with_capacity(INDEX_HEAD.len() + episodes.len() * 160);
    html.push_str(INDEX_HEAD);
    let _ = writeln!(html, "<!-- generated {} -->", escape_html(generated_utc));
    for episode in episodes {
        let _ = write!(
            html,
            "<tr>\n    <td><img src=\"./{series}_thumbnail/{no}.jpg\"></td>\n    <td>{title}</td>\n    <td>{rating}</td>\n    <td>{published_at}</td>\n</tr>\n",
            no = episode.no,
            title = escape_html(&episode.title),
            rating = escape_html(&episode.rating),
            published_at = escape_html(&episode.published_at),
        );
    }
    html.push_str(INDEX_TAIL);
    html
}

/// Atomically persist a rendered index as `{out_dir}/{series}.html`.
pub fn write_index(out_dir: &Path, series: SeriesId, html: &str) -> Result<PathBuf, PersistError> {
    let writer = AtomicFileWriter::new(out_dir.to_path_buf());
    writer.write(&format!("{series}.html"), html)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
