use bingo_core::content::splitmix64;
use bingo_core::InteractionMode;
use js_sys::Date;
use web_sys::UrlSearchParams;

use crate::input::prefers_coarse_pointer;

pub(crate) const DEFAULT_BOARD_COUNT: usize = 2;
pub(crate) const MAX_BOARD_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum InteractionPreference {
    #[default]
    Auto,
    Native,
    Pointer,
}

impl InteractionPreference {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "native" | "drag" => Some(Self::Native),
            "pointer" | "touch" => Some(Self::Pointer),
            _ => None,
        }
    }

    pub(crate) fn resolve(self, coarse_pointer: bool) -> InteractionMode {
        match self {
            Self::Native => InteractionMode::Native,
            Self::Pointer => InteractionMode::Pointer,
            Self::Auto if coarse_pointer => InteractionMode::Pointer,
            Self::Auto => InteractionMode::Native,
        }
    }
}

/// Settings read from the page URL, before platform detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UrlParams {
    pub(crate) boards: usize,
    pub(crate) interaction: InteractionPreference,
    pub(crate) edit_mode: bool,
    pub(crate) seed: Option<u64>,
}

impl Default for UrlParams {
    fn default() -> Self {
        Self {
            boards: DEFAULT_BOARD_COUNT,
            interaction: InteractionPreference::Auto,
            edit_mode: true,
            seed: None,
        }
    }
}

impl UrlParams {
    /// Applies one `key=value` pair. Unknown keys and unreadable values are
    /// skipped.
    pub(crate) fn apply(&mut self, key: &str, value: &str) {
        let key = key.trim();
        let value = value.trim();
        if key.eq_ignore_ascii_case("boards") {
            if let Ok(count) = value.parse::<usize>() {
                self.boards = count.clamp(1, MAX_BOARD_COUNT);
            }
        } else if key.eq_ignore_ascii_case("input") {
            if let Some(preference) = InteractionPreference::parse(value) {
                self.interaction = preference;
            }
        } else if key.eq_ignore_ascii_case("edit") {
            match value.to_ascii_lowercase().as_str() {
                "on" | "1" | "true" => self.edit_mode = true,
                "off" | "0" | "false" => self.edit_mode = false,
                _ => {}
            }
        } else if key.eq_ignore_ascii_case("seed") {
            if let Some(seed) = parse_seed(value) {
                self.seed = Some(seed);
            }
        }
    }

    pub(crate) fn apply_hash(&mut self, hash: &str) {
        let raw = hash.trim().trim_start_matches('#').trim();
        for chunk in raw.split(';') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            let mut iter = chunk.splitn(2, '=');
            let key = iter.next().unwrap_or("");
            let value = iter.next().unwrap_or("");
            self.apply(key, value);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InitConfig {
    pub(crate) boards: usize,
    pub(crate) interaction: InteractionMode,
    pub(crate) edit_mode: bool,
    pub(crate) seed: u64,
}

impl InitConfig {
    pub(crate) fn from_params(params: UrlParams, coarse_pointer: bool, fallback_seed: u64) -> Self {
        Self {
            boards: params.boards,
            interaction: params.interaction.resolve(coarse_pointer),
            edit_mode: params.edit_mode,
            seed: params.seed.unwrap_or(fallback_seed),
        }
    }

    /// Seed for one board on the page; boards never share content.
    pub(crate) fn board_seed(&self, index: usize) -> u64 {
        splitmix64(self.seed ^ (index as u64).wrapping_mul(0x9e3779b97f4a7c15))
    }
}

pub(crate) fn load_init_config() -> InitConfig {
    let params = load_url_params();
    InitConfig::from_params(params, prefers_coarse_pointer(), time_nonce())
}

fn load_url_params() -> UrlParams {
    let mut params = UrlParams::default();
    let Some(window) = web_sys::window() else {
        return params;
    };
    let location = window.location();
    if let Ok(hash) = location.hash() {
        params.apply_hash(&hash);
    }
    let search = location.search().unwrap_or_default();
    let search = search.trim();
    if search.is_empty() {
        return params;
    }
    let Ok(query) = UrlSearchParams::new_with_str(search) else {
        return params;
    };
    for key in ["boards", "input", "edit", "seed"] {
        if let Some(value) = query.get(key) {
            params.apply(key, &value);
        }
    }
    params
}

pub(crate) fn parse_seed(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse::<u64>().ok()
    }
}

fn time_nonce() -> u64 {
    let now = Date::now() as u64;
    splitmix64(now ^ 0x9e3779b97f4a7c15)
}
