//! Benefits free-text parsing for course display.

/// Split a newline-delimited benefits blob into clean display items.
///
/// Each line is trimmed and blank lines are dropped. Any leading run of
/// list markers (digits, `-`, `*`, `)`, `•`, `.`) is stripped with
/// re-trimming in between, so `"1) Free bath"` and `"- Free bath"` both
/// yield `"Free bath"`. Order is preserved, and running the function on its
/// own output returns the same list.
pub fn benefits_list(benefits: &str) -> Vec<String> {
    let mut items = Vec::new();
    for raw in benefits.lines() {
        let mut item = raw.trim();
        if item.is_empty() {
            continue;
        }
        while let Some(first) = item.chars().next() {
            if first.is_ascii_digit() || matches!(first, '-' | '*' | ')' | '•' | '.') {
                item = item[first.len_utf8()..].trim_start();
            } else {
                break;
            }
        }
        items.push(item.to_string());
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numbered_and_bulleted_markers() {
        let text = "1) Free bath\n- Free report\n\n2. Follow-up call";
        assert_eq!(
            benefits_list(text),
            vec!["Free bath", "Free report", "Follow-up call"]
        );
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(benefits_list("\n\n  \nFree bath\n\n"), vec!["Free bath"]);
    }

    #[test]
    fn strips_unicode_bullet() {
        assert_eq!(benefits_list("• Daily walk"), vec!["Daily walk"]);
    }

    #[test]
    fn strips_marker_runs() {
        assert_eq!(benefits_list("1.) - Obedience drills"), vec!["Obedience drills"]);
    }

    #[test]
    fn preserves_order() {
        assert_eq!(
            benefits_list("b\na\nc"),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn idempotent_on_own_output() {
        let text = "1) Free bath\n- Free report\n\n2. Follow-up call";
        let first = benefits_list(text);
        let second = benefits_list(&first.join("\n"));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(benefits_list("").is_empty());
    }
}
