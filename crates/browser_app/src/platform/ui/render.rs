use browser_core::{ErrorDialog, WebsiteEntry};

pub fn render_entries(entries: &[WebsiteEntry]) -> Vec<String> {
    let width = entries.len().to_string().len();
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{index:>width$}  {}", entry.name()))
        .collect()
}

pub fn render_dialog(dialog: &ErrorDialog) -> Vec<String> {
    let mut buttons = Vec::with_capacity(2);
    if dialog.options.show_next {
        buttons.push("[n]ext");
    }
    if dialog.options.show_retry {
        buttons.push("[r]etry");
    }
    if dialog.options.show_dismiss {
        buttons.push("[d]ismiss");
    }

    vec![
        format!("== {} ==", dialog.title),
        dialog.message.clone(),
        buttons.join("  "),
    ]
}

#[cfg(test)]
mod tests {
    use browser_core::{DialogOptions, ErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entries_are_numbered_from_zero() {
        let entries: Vec<_> = (0..11)
            .map(|i| WebsiteEntry::new(&format!("site {i}"), "http://example.com"))
            .collect();
        let lines = render_entries(&entries);
        assert_eq!(lines[0], " 0  site 0");
        assert_eq!(lines[10], "10  site 10");
    }

    #[test]
    fn dialog_lists_only_offered_buttons() {
        let dialog = ErrorDialog {
            kind: ErrorKind::NotFound,
            title: ErrorKind::NotFound.title().to_string(),
            message: "File not found: http://example.com".to_string(),
            options: DialogOptions {
                show_retry: true,
                show_next: false,
                show_dismiss: true,
            },
        };
        assert_eq!(
            render_dialog(&dialog),
            vec![
                "== Not found ==".to_string(),
                "File not found: http://example.com".to_string(),
                "[r]etry  [d]ismiss".to_string(),
            ]
        );
    }
}
