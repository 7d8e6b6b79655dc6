use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    Play,
    Pause,
    #[default]
    Stop,
}

/// Boolean playback switches mpd exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOption {
    Random,
    Repeat,
    Single,
    Consume,
}

impl PlayOption {
    pub const ALL: [PlayOption; 4] = [
        PlayOption::Random,
        PlayOption::Repeat,
        PlayOption::Single,
        PlayOption::Consume,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayOption::Random => "random",
            PlayOption::Repeat => "repeat",
            PlayOption::Single => "single",
            PlayOption::Consume => "consume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opt| opt.name() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub state: PlayState,
    /// `None` when mpd has no mixer
    pub volume: Option<u8>,
    pub random: bool,
    pub repeat: bool,
    pub single: bool,
    pub consume: bool,
}

impl Status {
    pub fn option(&self, opt: PlayOption) -> bool {
        match opt {
            PlayOption::Random => self.random,
            PlayOption::Repeat => self.repeat,
            PlayOption::Single => self.single,
            PlayOption::Consume => self.consume,
        }
    }
}

/// Reads the human readable block printed by `mpc status`.
///
/// ```text
/// Artist - Title
/// [playing] #2/10   0:10/3:45 (4%)
/// volume: 80%   repeat: off   random: on    single: off   consume: off
/// ```
///
/// The first two lines are missing while stopped.
pub struct StatusParser {
    state: Option<Regex>,
    volume: Option<Regex>,
    switches: Option<Regex>,
}

impl StatusParser {
    pub fn new() -> Self {
        Self {
            state: Regex::new(r"(?m)^\[(playing|paused)\]").ok(),
            volume: Regex::new(r"volume:\s*(\d+)%").ok(),
            switches: Regex::new(r"(repeat|random|single|consume):\s*(on|off|once)").ok(),
        }
    }

    pub fn parse(&self, output: &str) -> Status {
        let mut status = Status::default();

        if let Some(caps) = self.state.as_ref().and_then(|re| re.captures(output)) {
            status.state = match &caps[1] {
                "playing" => PlayState::Play,
                _ => PlayState::Pause,
            };
        }

        status.volume = self
            .volume
            .as_ref()
            .and_then(|re| re.captures(output))
            .and_then(|c| c[1].parse::<u8>().ok());

        if let Some(re) = &self.switches {
            for caps in re.captures_iter(output) {
                // "once" counts as enabled for single/consume
                let on = &caps[2] != "off";
                match &caps[1] {
                    "repeat" => status.repeat = on,
                    "random" => status.random = on,
                    "single" => status.single = on,
                    "consume" => status.consume = on,
                    _ => {}
                }
            }
        }

        status
    }
}

impl Default for StatusParser {
    fn default() -> Self {
        Self::new()
    }
}
