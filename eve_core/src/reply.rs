//! Post-processing of model completions.

use regex::RegexBuilder;
use tracing::debug;

/// Remove a leading name echo such as `"Hi, Maya: "` from a completion.
///
/// Matches only at the very start, at most once, case-insensitively. The
/// rest of the text is returned untouched.
#[must_use]
pub fn strip_name_echo(response: &str, known_name: Option<&str>) -> String {
    let Some(name) = known_name.filter(|n| !n.is_empty()) else {
        return response.to_string();
    };
    if response.is_empty() {
        return response.to_string();
    }

    let pattern = format!(r"^(Hi,?\s+)?({}[,:\s-]+)", regex::escape(name));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace(response, "").into_owned(),
        Err(e) => {
            debug!("Name echo pattern rejected for {name:?}: {e}");
            response.to_string()
        }
    }
}
