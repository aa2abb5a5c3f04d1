use std::io::{BufRead, Write};

use related_notes::{
    Corpus,
    Navigator,
    Pane,
    PaneWorkspace,
    Result,
    Workspace,
    navigator::{Action, DocumentList, KeywordList, Screen},
};

/// A line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Item(usize, Pane),
    Back,
    Quit,
    Invalid,
}

fn parse_choice(line: &str) -> Choice {
    let line = line.trim();
    match line {
        "q" | "quit" => return Choice::Quit,
        "b" | "back" => return Choice::Back,
        _ => {}
    }

    let (digits, pane) = match line.strip_suffix('+') {
        Some(rest) => (rest.trim(), Pane::Split),
        None => (line, Pane::Current),
    };
    match digits.parse() {
        Ok(n) => Choice::Item(n, pane),
        Err(_) => Choice::Invalid,
    }
}

fn render_keywords(list: &KeywordList, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", list.title)?;
    for (i, item) in list.items.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, item.label)?;
    }
    Ok(())
}

fn render_documents(list: &DocumentList, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:>3}. {}", 0, list.back.label)?;
    writeln!(out, "{}", list.header)?;
    for (i, item) in list.items.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, item.label)?;
    }
    Ok(())
}

/// Pick the action for a choice on the current screen.
fn resolve(choice: Choice, screen: &Screen) -> Option<(Action, Pane)> {
    match (choice, screen) {
        (Choice::Item(n, pane), Screen::Keywords(list)) => n
            .checked_sub(1)
            .and_then(|i| list.items.get(i))
            .map(|item| (item.action.clone(), pane)),
        (Choice::Back | Choice::Item(0, _), Screen::Documents(list)) => {
            Some((list.back.action.clone(), Pane::Current))
        }
        (Choice::Item(n, pane), Screen::Documents(list)) => list
            .items
            .get(n - 1)
            .map(|item| (item.action.clone(), pane)),
        _ => None,
    }
}

/// Drive a navigator session over a line-oriented terminal.
///
/// Ends when a note is opened, the user quits, or input runs out.
pub fn run_session<C, R, W>(
    navigator: &Navigator,
    corpus: &C,
    workspace: &mut PaneWorkspace,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    C: Corpus + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut screen = navigator.start();

    loop {
        match &screen {
            Screen::Keywords(list) => render_keywords(list, out)?,
            Screen::Documents(list) => render_documents(list, out)?,
            Screen::Closed => break,
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let choice = parse_choice(&line);
        if choice == Choice::Quit {
            break;
        }
        let Some((action, pane)) = resolve(choice, &screen) else {
            writeln!(out, "Invalid choice: {}", line.trim())?;
            continue;
        };

        match navigator.dispatch(&action, pane, corpus, workspace) {
            Ok(next) => {
                if let Action::OpenDocument(doc) = &action {
                    match pane {
                        Pane::Current => writeln!(out, "Opened {doc}")?,
                        Pane::Split => writeln!(out, "Opened {doc} in a new pane")?,
                    }
                }
                for notice in workspace.take_notices() {
                    writeln!(out, "{notice}")?;
                }
                screen = next;
            }
            // The screen stays as it was; the user can retry or pick another.
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }

    tracing::debug!(active = ?workspace.active_document(), "session closed");
    Ok(())
}
