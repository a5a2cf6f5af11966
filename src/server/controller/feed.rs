use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Datelike, Utc};

use crate::server::{
    data::CalendarFileRepository, error::AppError, state::AppState, util::url::webcal_base,
};

const USER_ID_PLACEHOLDER: &str = "{YOUR_DISCORD_USER_ID}";

/// Instructions page.
///
/// Shows the feed URL template for the configured host, a copy button and how often
/// feeds refresh. Users get their personal link from the `/mycalendar` command.
///
/// # Returns
/// - `200 OK` - HTML page
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;
    let template = format!(
        "{}/cal/{USER_ID_PLACEHOLDER}.ics",
        webcal_base(&config.base_url)
    );

    Html(render_home(
        &template,
        Utc::now().year(),
        config.poll_interval_minutes,
    ))
}

fn render_home(template: &str, year: i32, poll_interval_minutes: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Discord Events Calendar</title>
<style>
 body{{font-family:'Segoe UI',Tahoma,sans-serif;background:#eef2f7;margin:0}}
 .container{{max-width:720px;margin:40px auto;background:#fff;padding:30px;box-shadow:0 4px 12px rgba(0,0,0,.1);border-radius:10px}}
 .input-group{{margin:20px 0;display:flex}}
 .input-group input{{flex:1;padding:10px;border:1px solid #ccc;border-right:0;border-radius:4px 0 0 4px;font-size:1em}}
 .input-group button{{padding:10px 20px;border:0;background:#1d72b8;color:#fff;border-radius:0 4px 4px 0;cursor:pointer}}
 .input-group button:hover{{background:#155d8b}}
 .footer{{margin-top:30px;font-size:.9em;color:#777}}
</style></head>
<body><div class="container"><h1>Discord Events Calendar</h1>
<p>Subscribe to your personal calendar feed and stay up to date automatically.</p>
<p>Run <code>/mycalendar</code> in any server with the bot to get your link by DM, or replace <code>{USER_ID_PLACEHOLDER}</code> in the URL below:</p>
<div class="input-group"><input id="feed" value="{template}" readonly onclick="this.select();"/><button onclick="navigator.clipboard.writeText(document.getElementById('feed').value);">Copy</button></div>
<div class="footer">&copy; {year} Discord Events Calendar &nbsp;|&nbsp; Auto-refresh every {poll_interval_minutes} min</div></div></body></html>"#
    )
}

/// Serves a user's calendar feed.
///
/// The path segment must be `{user_id}.ics` with a numeric user ID.
///
/// # Returns
/// - `200 OK` - The `.ics` file as `text/calendar`
/// - `404 Not Found` - Malformed file name or the user has no feed
pub async fn get_feed(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = file
        .strip_suffix(".ics")
        .and_then(|id| id.parse::<u64>().ok())
        .ok_or_else(|| AppError::NotFound(format!("No calendar at {file}")))?;

    let body = CalendarFileRepository::new(&state.config.data_dir)
        .read(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No calendar for user {user_id}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{user_id}.ics\""),
            ),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        body,
    ))
}
