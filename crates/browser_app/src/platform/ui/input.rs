use browser_core::DialogOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open(usize),
    Reload,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Retry,
    Next,
    Dismiss,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "reload" => Some(Command::Reload),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => other.parse().ok().map(Command::Open),
    }
}

/// Parse a dialog answer, accepting only the buttons the dialog offers.
pub fn parse_choice(line: &str, options: DialogOptions) -> Option<DialogChoice> {
    let choice = match line.trim().to_ascii_lowercase().as_str() {
        "r" | "retry" => DialogChoice::Retry,
        "n" | "next" => DialogChoice::Next,
        "d" | "dismiss" => DialogChoice::Dismiss,
        _ => return None,
    };
    let offered = match choice {
        DialogChoice::Retry => options.show_retry,
        DialogChoice::Next => options.show_next,
        DialogChoice::Dismiss => options.show_dismiss,
    };
    offered.then_some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAST: DialogOptions = DialogOptions {
        show_retry: true,
        show_next: false,
        show_dismiss: true,
    };

    #[test]
    fn commands() {
        assert_eq!(parse_command(" 3 \n"), Some(Command::Open(3)));
        assert_eq!(parse_command("R"), Some(Command::Reload));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("-1"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn choices_must_be_offered() {
        assert_eq!(parse_choice("r\n", LAST), Some(DialogChoice::Retry));
        assert_eq!(parse_choice("Dismiss", LAST), Some(DialogChoice::Dismiss));
        assert_eq!(parse_choice("n", LAST), None);

        let middle = DialogOptions {
            show_retry: false,
            show_next: true,
            show_dismiss: false,
        };
        assert_eq!(parse_choice("next", middle), Some(DialogChoice::Next));
        assert_eq!(parse_choice("r", middle), None);
    }
}
