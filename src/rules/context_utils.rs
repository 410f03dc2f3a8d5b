/// Longest context snippet reported without shortening
const MAX_CONTEXT_CHARS: usize = 30;

/// Shorten a context snippet, keeping the end(s) where the problem is.
///
/// `left`/`right` say which side of the snippet is at fault; with both, the middle is elided.
pub fn shorten_context(context: &str, left: bool, right: bool) -> String {
    let chars: Vec<char> = context.chars().collect();
    if chars.len() <= MAX_CONTEXT_CHARS {
        return context.to_string();
    }
    let head = |n: usize| chars[..n].iter().collect::<String>();
    let tail = |n: usize| chars[chars.len() - n..].iter().collect::<String>();
    if left && right {
        format!("{}...{}", head(MAX_CONTEXT_CHARS / 2), tail(MAX_CONTEXT_CHARS / 2))
    } else if right {
        format!("...{}", tail(MAX_CONTEXT_CHARS))
    } else {
        format!("{}...", head(MAX_CONTEXT_CHARS))
    }
}
