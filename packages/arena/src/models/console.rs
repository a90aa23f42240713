use opendere_engine::{Message, Recipient};

/// 標準入力の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// `#arena nick text` チャンネルでの発言
    Public {
        arena: String,
        nick: String,
        text: String,
    },
    /// `nick text` ボットへの個別メッセージ
    Private { nick: String, text: String },
    /// `:status #arena`
    Status { arena: String },
    /// `:nick old new`
    Rename { old: String, new: String },
    /// `:quit`
    Quit,
}

pub const USAGE: &str = "usage: `#arena nick text` to talk in an arena, `nick text` to message the bot, `:status #arena`, `:nick old new`, `:quit`";

/// 1行を解釈する。空行や形式に合わない行は `None`
pub fn parse_line(line: &str) -> Option<ConsoleInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(meta) = line.strip_prefix(':') {
        let mut words = meta.split_whitespace();
        return match (words.next(), words.next(), words.next()) {
            (Some("quit"), None, None) => Some(ConsoleInput::Quit),
            (Some("status"), Some(arena), None) => Some(ConsoleInput::Status {
                arena: arena.to_string(),
            }),
            (Some("nick"), Some(old), Some(new)) => Some(ConsoleInput::Rename {
                old: old.to_string(),
                new: new.to_string(),
            }),
            _ => None,
        };
    }

    if line.starts_with('#') {
        let mut parts = line.splitn(3, char::is_whitespace);
        let arena = parts.next()?;
        let nick = parts.next()?;
        let text = parts.next()?.trim();
        return Some(ConsoleInput::Public {
            arena: arena.to_string(),
            nick: nick.to_string(),
            text: text.to_string(),
        });
    }

    let (nick, text) = line.split_once(char::is_whitespace)?;
    Some(ConsoleInput::Private {
        nick: nick.to_string(),
        text: text.trim().to_string(),
    })
}

/// エンジンからのメッセージを端末向けに整形する
pub fn render(arena: &str, message: &Message) -> String {
    match &message.recipient {
        Recipient::Channel => format!("[{}] {}", arena, message.text),
        Recipient::Player(id) => format!("[{} -> {}] {}", arena, id, message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_and_private() {
        assert_eq!(
            parse_line("#opendere alice !vote bob"),
            Some(ConsoleInput::Public {
                arena: "#opendere".to_string(),
                nick: "alice".to_string(),
                text: "!vote bob".to_string(),
            })
        );
        assert_eq!(
            parse_line("  alice   check bob "),
            Some(ConsoleInput::Private {
                nick: "alice".to_string(),
                text: "check bob".to_string(),
            })
        );
        assert_eq!(parse_line("#opendere alice"), None);
        assert_eq!(parse_line("alice"), None);
    }

    #[test]
    fn test_parse_meta_commands() {
        assert_eq!(parse_line(":quit"), Some(ConsoleInput::Quit));
        assert_eq!(
            parse_line(":status #opendere"),
            Some(ConsoleInput::Status {
                arena: "#opendere".to_string()
            })
        );
        assert_eq!(
            parse_line(":nick alice alicia"),
            Some(ConsoleInput::Rename {
                old: "alice".to_string(),
                new: "alicia".to_string()
            })
        );
        assert_eq!(parse_line(":dance"), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(render("#opendere", &Message::channel("hi")), "[#opendere] hi");
        assert_eq!(
            render("#opendere", &Message::player("bob", "psst")),
            "[#opendere -> bob] psst"
        );
    }
}
