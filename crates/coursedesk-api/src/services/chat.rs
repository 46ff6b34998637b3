//! Rule-based help replies.
//!
//! Keywords are matched as substrings of the lower-cased, trimmed message, first match wins.
//! Substring matching means "this" answers with the greeting (it contains "hi").

const UPLOAD_REPLY: &str = "You can upload your curriculum in the 'Upload Curriculum' section 📂. Click 'Browse File' or drag & drop the file.";
const FEEDBACK_REPLY: &str = "We'd love to hear your feedback — use the feedback form with your name and email so we can follow up. 💬";
const ANALYTICS_REPLY: &str = "Open the Analytics card and click 'View Analytics' to see recent uploads and feedback counts.";
const GREETING_REPLY: &str = "Hello there 👋! How can I assist you today?";
const HELP_REPLY: &str = "I'm a helper bot for uploads, analytics and feedback. Try asking about 'upload', 'feedback', or 'analytics'.";

/// Reply to a message that is blank after trimming
pub const EMPTY_MESSAGE_REPLY: &str = "Please send a message in the 'message' field.";

const RULES: &[(&[&str], &str)] = &[
    (&["upload"], UPLOAD_REPLY),
    (&["feedback"], FEEDBACK_REPLY),
    (&["analytics"], ANALYTICS_REPLY),
    (&["hello", "hi"], GREETING_REPLY),
];

/// Pick the reply for `message`, or `None` when it is blank.
pub fn reply_for(message: &str) -> Option<&'static str> {
    let text = message.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let reply = RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(HELP_REPLY);
    Some(reply)
}
