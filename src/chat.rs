//! Telegram chat addressing and HTML helpers.
//!
//! Only supergroups have publicly addressable messages; their chat ids carry a
//! `-100` marker in front of the internal id, which has to be stripped to
//! build a `t.me/c/` deep link.

use crate::event::{ChatId, MessageId, UserId};

/// Chat ids below this value belong to supergroups (`-100` marker plus the
/// internal id).
const SUPERGROUP_ID_MARKER: i64 = -1_000_000_000_000;

pub fn is_supergroup(chat_id: ChatId) -> bool {
    chat_id < SUPERGROUP_ID_MARKER
}

/// Private-style deep link to a message in a supergroup. Callers must check
/// [`is_supergroup`] first; the marker strip is meaningless for other chats.
pub fn message_link(chat_id: ChatId, message_id: MessageId) -> String {
    let internal_id = -chat_id + SUPERGROUP_ID_MARKER;
    format!("https://t.me/c/{internal_id}/{message_id}")
}

pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// HTML mention that works without a username, via the `tg://user` scheme.
pub fn mention_escaped(user_id: UserId, name: &str) -> String {
    format!("<a href=\"tg://user?id={user_id}\">{}</a>", html_escape(name))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(-1_001_234_567_890, true; "supergroup")]
    #[test_case(-4321, false; "basic group")]
    #[test_case(42, false; "private chat")]
    fn supergroup_detection(chat_id: ChatId, expected: bool) {
        assert_eq!(is_supergroup(chat_id), expected);
    }

    #[test]
    fn message_link_strips_the_marker() {
        assert_eq!(
            message_link(-1_001_234_567_890, 55),
            "https://t.me/c/1234567890/55"
        );
    }

    #[test]
    fn html_escape_handles_ampersand_first() {
        assert_eq!(html_escape("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(html_escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn mention_escapes_the_name_only() {
        assert_eq!(
            mention_escaped(7, "<Ann>"),
            "<a href=\"tg://user?id=7\">&lt;Ann&gt;</a>"
        );
    }
}
