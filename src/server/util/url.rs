//! Builders for the links handed out to users and written into VEVENTs.

/// Public `webcal://` URL of a user's feed.
///
/// Calendar apps treat `webcal://` as "subscribe", so this is the link users click.
/// The base URL's scheme is swapped and any host, port and path prefix are kept.
pub fn feed_url(base_url: &str, user_id: u64) -> String {
    format!("{}{}", webcal_base(base_url), feed_path(user_id))
}

/// The base URL with its scheme replaced by `webcal://`.
pub fn webcal_base(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);

    format!("webcal://{without_scheme}")
}

/// Plain `http(s)://` URL of a user's feed, for clients that reject `webcal://`.
pub fn https_feed_url(base_url: &str, user_id: u64) -> String {
    format!("{}{}", base_url, feed_path(user_id))
}

pub fn feed_path(user_id: u64) -> String {
    format!("/cal/{user_id}.ics")
}

/// Link opening the event inside Discord.
pub fn discord_event_url(guild_id: u64, event_id: u64) -> String {
    format!("https://discord.com/events/{guild_id}/{event_id}")
}

/// Google Maps search for a free-text address.
pub fn maps_search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("https://www.google.com/maps/search/{encoded}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_webcal_url_from_base() {
        assert_eq!(
            feed_url("https://cal.example.org", 123456),
            "webcal://cal.example.org/cal/123456.ics"
        );
        assert_eq!(
            feed_url("http://localhost:9000/bot", 7),
            "webcal://localhost:9000/bot/cal/7.ics"
        );
    }

    #[test]
    fn builds_https_url_from_base() {
        assert_eq!(
            https_feed_url("https://cal.example.org", 123456),
            "https://cal.example.org/cal/123456.ics"
        );
    }

    #[test]
    fn encodes_maps_query_like_a_form() {
        assert_eq!(
            maps_search_url("221B Baker St, London"),
            "https://www.google.com/maps/search/221B+Baker+St%2C+London"
        );
    }
}
