use crate::consultation::SpeechRequest;

/// Wraps the answer text in the SSML document the speech service expects.
pub fn build_ssml(request: &SpeechRequest<'_>) -> String {
    format!(
        "<speak version='1.0' xml:lang='{lang}'>\
         <voice name='{voice}'>\
         <prosody rate='{rate}'>{text}</prosody>\
         </voice>\
         </speak>",
        lang = request.language,
        voice = request.voice,
        rate = request.rate,
        text = escape_xml(request.text),
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
