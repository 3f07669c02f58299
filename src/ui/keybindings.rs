/// Keyboard shortcuts
///
/// Ctrl + Left/Right/Delete drive the folder cursor; the same keys without
/// a modifier drive the media cursor, and Space plays the current video.
use iced::keyboard::key::Named;
use iced::keyboard::{Key, Modifiers};

/// A navigation command, triggered by a button or a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PrevFolder,
    NextFolder,
    DeleteFolder,
    PrevMedia,
    NextMedia,
    DeleteMedia,
    PlayMedia,
}

pub fn action_for(key: &Key, modifiers: Modifiers) -> Option<Action> {
    let Key::Named(named) = key else {
        return None;
    };

    if modifiers.control() {
        match named {
            Named::ArrowLeft => Some(Action::PrevFolder),
            Named::ArrowRight => Some(Action::NextFolder),
            Named::Delete => Some(Action::DeleteFolder),
            _ => None,
        }
    } else {
        match named {
            Named::ArrowLeft => Some(Action::PrevMedia),
            Named::ArrowRight => Some(Action::NextMedia),
            Named::Delete => Some(Action::DeleteMedia),
            Named::Space => Some(Action::PlayMedia),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(key: Named) -> Key {
        Key::Named(key)
    }

    #[test]
    fn test_ctrl_arrows_move_folders() {
        assert_eq!(
            action_for(&named(Named::ArrowLeft), Modifiers::CTRL),
            Some(Action::PrevFolder)
        );
        assert_eq!(
            action_for(&named(Named::ArrowRight), Modifiers::CTRL),
            Some(Action::NextFolder)
        );
        assert_eq!(
            action_for(&named(Named::Delete), Modifiers::CTRL),
            Some(Action::DeleteFolder)
        );
    }

    #[test]
    fn test_plain_keys_drive_media() {
        let none = Modifiers::empty();
        assert_eq!(action_for(&named(Named::ArrowLeft), none), Some(Action::PrevMedia));
        assert_eq!(action_for(&named(Named::ArrowRight), none), Some(Action::NextMedia));
        assert_eq!(action_for(&named(Named::Delete), none), Some(Action::DeleteMedia));
        assert_eq!(action_for(&named(Named::Space), none), Some(Action::PlayMedia));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(action_for(&named(Named::Space), Modifiers::CTRL), None);
        assert_eq!(action_for(&named(Named::Enter), Modifiers::empty()), None);
        assert_eq!(action_for(&Key::Character("d".into()), Modifiers::CTRL), None);
    }
}
