use std::{fmt, str::FromStr, time::Duration};

use bitflags::bitflags;

use super::{PlayerError, Response};

/// Playback state reported in the `state` status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Playing
    Play,
    /// Paused
    Pause,
    /// Stopped
    #[default]
    Stop,
}

impl FromStr for PlaybackState {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "stop" => Ok(Self::Stop),
            other => Err(malformed("state", other)),
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Play => "playing",
            Self::Pause => "paused",
            Self::Stop => "stopped",
        };
        f.write_str(s)
    }
}

/// Snapshot of the daemon status, fetched on demand and never cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Status {
    /// Volume 0-100, `None` when the daemon has no mixer
    pub volume: Option<u8>,
    /// Current playback state
    pub state: PlaybackState,
    /// Repeat mode
    pub repeat: bool,
    /// Random mode
    pub random: bool,
    /// Single mode
    pub single: bool,
    /// Consume mode
    pub consume: bool,
    /// Number of entries in the queue
    pub playlist_length: u32,
    /// Queue position of the current song
    pub song: Option<u32>,
    /// Time into the current song
    pub elapsed: Option<Duration>,
    /// Length of the current song
    pub duration: Option<Duration>,
}

impl TryFrom<&Response> for Status {
    type Error = PlayerError;

    fn try_from(response: &Response) -> Result<Self, Self::Error> {
        let volume = match response.get("volume") {
            None => None,
            Some(raw) => {
                let level: i32 = parse_field("volume", raw)?;
                u8::try_from(level).ok().filter(|level| *level <= 100)
            }
        };

        Ok(Self {
            volume,
            state: response
                .get("state")
                .map(str::parse::<PlaybackState>)
                .transpose()?
                .unwrap_or_default(),
            repeat: flag(response, "repeat")?,
            random: flag(response, "random")?,
            single: flag(response, "single")?,
            consume: flag(response, "consume")?,
            playlist_length: optional(response, "playlistlength")?.unwrap_or_default(),
            song: optional(response, "song")?,
            elapsed: seconds(response, "elapsed")?,
            duration: seconds(response, "duration")?,
        })
    }
}

/// Song currently selected on the daemon.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Song {
    /// File path or stream URL
    pub file: String,
    /// Track title
    pub title: Option<String>,
    /// Artist
    pub artist: Option<String>,
    /// Album
    pub album: Option<String>,
    /// Stream or station name
    pub name: Option<String>,
    /// Queue position
    pub position: Option<u32>,
    /// Queue id
    pub id: Option<u32>,
    /// Song length
    pub duration: Option<Duration>,
}

impl Song {
    /// Best human readable label: "Artist - Title", title, station name, or file.
    pub fn display_name(&self) -> String {
        match (&self.artist, &self.title, &self.name) {
            (Some(artist), Some(title), _) => format!("{artist} - {title}"),
            (None, Some(title), _) => title.clone(),
            (_, None, Some(name)) => name.clone(),
            _ => self.file.clone(),
        }
    }

    /// Parses a `currentsong` response. An empty response means no song.
    ///
    /// # Errors
    /// Returns `PlayerError::MalformedResponse` if a numeric field is invalid.
    pub fn from_response(response: &Response) -> Result<Option<Self>, PlayerError> {
        let Some(file) = response.get("file") else {
            return Ok(None);
        };

        Ok(Some(Self {
            file: file.to_string(),
            title: response.get("Title").map(str::to_string),
            artist: response.get("Artist").map(str::to_string),
            album: response.get("Album").map(str::to_string),
            name: response.get("Name").map(str::to_string),
            position: optional(response, "Pos")?,
            id: optional(response, "Id")?,
            duration: seconds(response, "duration")?,
        }))
    }
}

bitflags! {
    /// Daemon subsystems that `idle` can wait on and report as changed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Subsystems: u16 {
        /// Song database
        const DATABASE = 1 << 0;
        /// Database update started or finished
        const UPDATE = 1 << 1;
        /// Stored playlists
        const STORED_PLAYLIST = 1 << 2;
        /// The queue
        const PLAYLIST = 1 << 3;
        /// Play, pause, stop, seek, song change
        const PLAYER = 1 << 4;
        /// Volume
        const MIXER = 1 << 5;
        /// Audio outputs
        const OUTPUT = 1 << 6;
        /// Repeat, random, crossfade and friends
        const OPTIONS = 1 << 7;
        /// Partitions
        const PARTITION = 1 << 8;
        /// Stickers
        const STICKER = 1 << 9;
        /// Client channel subscriptions
        const SUBSCRIPTION = 1 << 10;
        /// Client channel messages
        const MESSAGE = 1 << 11;
    }
}

const SUBSYSTEM_NAMES: [(Subsystems, &str); 12] = [
    (Subsystems::DATABASE, "database"),
    (Subsystems::UPDATE, "update"),
    (Subsystems::STORED_PLAYLIST, "stored_playlist"),
    (Subsystems::PLAYLIST, "playlist"),
    (Subsystems::PLAYER, "player"),
    (Subsystems::MIXER, "mixer"),
    (Subsystems::OUTPUT, "output"),
    (Subsystems::OPTIONS, "options"),
    (Subsystems::PARTITION, "partition"),
    (Subsystems::STICKER, "sticker"),
    (Subsystems::SUBSCRIPTION, "subscription"),
    (Subsystems::MESSAGE, "message"),
];

impl Subsystems {
    /// Looks up a subsystem by its protocol name.
    pub fn from_protocol_name(name: &str) -> Option<Self> {
        SUBSYSTEM_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }

    /// Protocol names of every set flag, in protocol order.
    pub fn names(self) -> Vec<&'static str> {
        SUBSYSTEM_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Collects the `changed` lines of an idle response.
    ///
    /// Unknown names are skipped; newer daemons may report subsystems this
    /// client does not know.
    pub fn from_response(response: &Response) -> Self {
        response
            .get_all("changed")
            .filter_map(Self::from_protocol_name)
            .fold(Self::empty(), |acc, flag| acc | flag)
    }
}

fn malformed(field: &str, value: &str) -> PlayerError {
    PlayerError::MalformedResponse {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_field<T: FromStr>(field: &str, raw: &str) -> Result<T, PlayerError> {
    raw.parse().map_err(|_| malformed(field, raw))
}

fn optional<T: FromStr>(response: &Response, field: &str) -> Result<Option<T>, PlayerError> {
    response
        .get(field)
        .map(|raw| parse_field(field, raw))
        .transpose()
}

fn flag(response: &Response, field: &str) -> Result<bool, PlayerError> {
    match response.get(field) {
        None | Some("0") => Ok(false),
        Some("1") | Some("oneshot") => Ok(true),
        Some(other) => Err(malformed(field, other)),
    }
}

fn seconds(response: &Response, field: &str) -> Result<Option<Duration>, PlayerError> {
    let Some(raw) = response.get(field) else {
        return Ok(None);
    };

    let secs: f64 = parse_field(field, raw)?;
    Duration::try_from_secs_f64(secs)
        .map(Some)
        .map_err(|_| malformed(field, raw))
}
