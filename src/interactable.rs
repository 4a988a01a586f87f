//! Generic interaction hook for scene objects.

use std::any::Any;

/// Optional context passed along with an interaction.
#[derive(Default, Clone, Copy)]
pub struct Interaction<'a> {
    /// Free-form note from the initiator.
    pub message: Option<&'a str>,
    /// First payload; read it back with [`extra_as`](Self::extra_as).
    pub extra: Option<&'a dyn Any>,
    /// Second payload; read it back with [`another_extra_as`](Self::another_extra_as).
    pub another_extra: Option<&'a dyn Any>,
}

impl<'a> Interaction<'a> {
    /// An interaction with no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message.
    pub fn with_message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    /// Attach the first payload.
    pub fn with_extra(mut self, extra: &'a dyn Any) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Attach the second payload.
    pub fn with_another_extra(mut self, extra: &'a dyn Any) -> Self {
        self.another_extra = Some(extra);
        self
    }

    /// The first extra payload, if it is a `T`.
    pub fn extra_as<T: Any>(&self) -> Option<&'a T> {
        self.extra.and_then(|e| e.downcast_ref())
    }

    /// The second extra payload, if it is a `T`.
    pub fn another_extra_as<T: Any>(&self) -> Option<&'a T> {
        self.another_extra.and_then(|e| e.downcast_ref())
    }
}

/// Something that reacts when interacted with, given data of type `T`.
pub trait Interactable<T> {
    /// React to `data` sent by whoever initiated the interaction.
    fn interact(&self, data: T, interaction: Interaction<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Door {
        opened_by: Mutex<Vec<String>>,
    }

    struct Key(u32);

    impl<'a> Interactable<&'a str> for Door {
        fn interact(&self, who: &'a str, interaction: Interaction<'_>) {
            let key = interaction.extra_as::<Key>().map_or(0, |k| k.0);
            let note = interaction.message.unwrap_or("-");
            self.opened_by
                .lock()
                .unwrap()
                .push(format!("{who}:{key}:{note}"));
        }
    }

    #[test]
    fn test_interact_with_context() {
        let door = Door::default();
        let key = Key(7);

        door.interact("player", Interaction::new().with_message("creak").with_extra(&key));
        door.interact("npc", Interaction::new());

        assert_eq!(
            *door.opened_by.lock().unwrap(),
            ["player:7:creak".to_string(), "npc:0:-".to_string()]
        );
    }

    #[test]
    fn test_extra_of_wrong_type() {
        let number = 3u8;
        let interaction = Interaction::new()
            .with_extra(&number)
            .with_another_extra(&"label");
        assert!(interaction.extra_as::<u32>().is_none());
        assert_eq!(interaction.extra_as::<u8>(), Some(&3));
        assert_eq!(interaction.another_extra_as::<&str>(), Some(&"label"));
    }
}
