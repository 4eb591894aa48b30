//! Key mapping for codews
//!
//! Maps key events to an [Action], parsing the key lists from the `[keys]` config table.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

/// Selection movement and directory changes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    SelectNext,
    SelectPrev,
    /// Enter the selected directory or open the selected file.
    Enter,
    GoUp,
}

/// Actions on the selected entry or the current directory
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    CompileAndRun,
    MakeExecutable,
    MakeNotExecutable,
    Execute,
    NewFile,
    NewDirectory,
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` table
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut map = HashMap::new();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use SystemAction as S;

        bind!(keys.select_next(),           Action::Nav(N::SelectNext));
        bind!(keys.select_prev(),           Action::Nav(N::SelectPrev));
        bind!(keys.enter(),                 Action::Nav(N::Enter));
        bind!(keys.go_up(),                 Action::Nav(N::GoUp));

        bind!(keys.compile_run(),           Action::File(F::CompileAndRun));
        bind!(keys.make_executable(),       Action::File(F::MakeExecutable));
        bind!(keys.make_not_executable(),   Action::File(F::MakeNotExecutable));
        bind!(keys.execute(),               Action::File(F::Execute));
        bind!(keys.new_file(),              Action::File(F::NewFile));
        bind!(keys.new_directory(),         Action::File(F::NewDirectory));
        bind!(keys.delete(),                Action::File(F::Delete));

        bind!(keys.quit(),                  Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

/// Parses one key binding from the config into a [Key].
///
/// A binding is an optional list of modifiers followed by a key, separated by `+` or `-`:
/// `Ctrl+r`, `ctrl-r`, `Alt+Enter`. Vim notation is accepted too: `<c-r>`, `<a-x>`, `<s-Tab>`.
/// Modifiers are `c`/`ctrl`/`control`, `a`/`m`/`alt`/`meta` and `s`/`shift`. The key is a single
/// character, `F1`..`F24`, or a named key such as `Enter` or `PageUp`. Everything is
/// case-insensitive except single characters. A lone `-` or `+` binds that character, and so
/// does a trailing one (`Ctrl+-`).
pub fn parse_key(s: &str) -> Option<Key> {
    const SEPARATORS: [char; 2] = ['+', '-'];

    let s = s.trim();
    let body = s
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(s);
    if body.is_empty() {
        return None;
    }

    let (prefix, key) = match body.strip_suffix(SEPARATORS) {
        Some("") => ("", body),
        Some(head) => (head.strip_suffix(SEPARATORS)?, &body[head.len()..]),
        None => match body.rfind(SEPARATORS) {
            Some(i) => (&body[..i], &body[i + 1..]),
            None => ("", body),
        },
    };

    let mut modifiers = KeyModifiers::NONE;
    for modifier in prefix.split(SEPARATORS) {
        modifiers |= match modifier.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "a" | "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            "" if prefix.is_empty() => KeyModifiers::NONE,
            _ => return None,
        };
    }

    let code = parse_code(key, modifiers.contains(KeyModifiers::SHIFT))?;
    Some(Key { code, modifiers })
}

/// Named keys: arrows, `Enter`/`CR`/`Return`, `Esc`, `Backspace`/`BS`, `Tab`, `Space`,
/// `Delete`, `Home`, `End`, `PageUp`, `PageDown` and function keys.
fn parse_code(key: &str, shift: bool) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = if shift { c.to_ascii_uppercase() } else { c };
        return Some(KeyCode::Char(c));
    }

    let name = key.to_ascii_lowercase();
    let code = match name.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "cr" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" | "bs" | "back" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" | "spc" => KeyCode::Char(' '),
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let n: u8 = name.strip_prefix('f')?.parse().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    };
    Some(code)
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => eprintln!("[Warning] ignoring unparsable key binding {:?}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_forms() {
        assert_eq!(
            parse_key("Ctrl+r"),
            Some(Key {
                code: KeyCode::Char('r'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(parse_key("<c-r>"), parse_key("ctrl+r"));
        assert_eq!(
            parse_key("Backspace").map(|k| k.code),
            Some(KeyCode::Backspace)
        );
        assert_eq!(parse_key("bogus"), None);
    }

    #[test]
    fn parse_key_accepts_dash_and_function_keys() {
        let ctrl_x = Some(Key {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert_eq!(parse_key("ctrl-x"), ctrl_x);
        assert_eq!(parse_key("Control+x"), ctrl_x);
        assert_eq!(parse_key("<C-x>"), ctrl_x);

        assert_eq!(
            parse_key("Alt-F5"),
            Some(Key {
                code: KeyCode::F(5),
                modifiers: KeyModifiers::ALT
            })
        );
        assert_eq!(parse_key("<s-Tab>").map(|k| k.code), Some(KeyCode::Tab));
        assert_eq!(
            parse_key("shift+r"),
            Some(Key {
                code: KeyCode::Char('R'),
                modifiers: KeyModifiers::SHIFT
            })
        );
        assert_eq!(parse_key("F25"), None);
        assert_eq!(parse_key("hyper+x"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn parse_key_binds_separator_characters() {
        assert_eq!(parse_key("-").map(|k| k.code), Some(KeyCode::Char('-')));
        assert_eq!(parse_key("+").map(|k| k.code), Some(KeyCode::Char('+')));
        assert_eq!(
            parse_key("Ctrl+-"),
            Some(Key {
                code: KeyCode::Char('-'),
                modifiers: KeyModifiers::CONTROL
            })
        );
    }

    #[test]
    fn default_keys_map_to_actions() {
        let keymap = Keymap::from_keys(&Keys::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::File(FileAction::CompileAndRun))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::File(FileAction::Execute))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::File(FileAction::MakeNotExecutable))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::Enter))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }
}
