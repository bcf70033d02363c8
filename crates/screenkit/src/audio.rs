//! Audio collaborator
//!
//! Screens hand their window's music playlist to an [`AudioPlayer`] and stop
//! sound effects when they unload. Playback itself lives behind the trait.

/// Music and sound effect playback used by screens
pub trait AudioPlayer {
    /// Register a playlist under `name`; returns whether it was accepted
    fn register_playlist(&mut self, name: &str, tracks: &[String]) -> bool;

    /// Start a registered playlist
    fn play_playlist(&mut self, name: &str, looped: bool);

    /// Stop every playing sound effect
    fn kill_all_sfx(&mut self);
}

/// Audio player that only logs requests
#[derive(Debug, Clone, Default)]
pub struct NullAudio {
    playlists: Vec<String>,
}

impl NullAudio {
    /// Create a silent player
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the playlists registered so far
    pub fn playlists(&self) -> &[String] {
        &self.playlists
    }
}

impl AudioPlayer for NullAudio {
    fn register_playlist(&mut self, name: &str, tracks: &[String]) -> bool {
        if tracks.is_empty() {
            return false;
        }
        log::debug!("Playlist {name} registered with {} tracks", tracks.len());
        if !self.playlists.iter().any(|known| known == name) {
            self.playlists.push(name.to_string());
        }
        true
    }

    fn play_playlist(&mut self, name: &str, looped: bool) {
        log::debug!("Playing playlist {name} (looped: {looped})");
    }

    fn kill_all_sfx(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_playlist_is_rejected() {
        let mut audio = NullAudio::new();
        assert!(!audio.register_playlist("Menu", &[]));
        assert!(audio.register_playlist("Menu", &["Theme".to_string()]));
        assert!(audio.register_playlist("Menu", &["Theme".to_string()]));
        assert_eq!(audio.playlists(), ["Menu"]);
    }
}
