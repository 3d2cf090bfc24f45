//! Static audio lookup tables: ambient tracks for guided sessions, mood
//! check-in feedback sounds, and the SOS breathing configuration.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

pub const DEFAULT_VOLUME: f32 = 0.4;
pub const FADE_IN_DURATION: f32 = 2.0;
pub const FADE_OUT_DURATION: f32 = 3.0;
pub const CROSSFADE_DURATION: f32 = 1.5;
/// Volume reduction applied while the assistant is speaking.
pub const DUCKING_REDUCTION: f32 = 0.4;

const DEFAULT_TRACK: &str = "gentle_rain.mp3";

static SESSION_AUDIO_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("box_breathing", "gentle_rain.mp3"),
        ("4_7_8_breathing", "deep_piano.mp3"),
        ("progressive_muscle_relaxation", "forest_birds.mp3"),
        ("gratitude_practice", "ambient_ocean.mp3"),
        ("body_scan_for_sleep", "night_wind.mp3"),
        ("quick_calm", "deep_piano.mp3"),
        ("evening_wind_down", "forest_birds.mp3"),
        ("mindful_moment", "gentle_rain.mp3"),
        ("morning_reset", "sunrise_soft.mp3"),
    ])
});

static EMOTION_TRACK_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ansioso", "gentle_rain.mp3"),
        ("triste", "deep_piano.mp3"),
        ("estressado", "forest_birds.mp3"),
        ("cansado", "night_wind.mp3"),
        ("agitado", "ambient_ocean.mp3"),
        ("feliz", "sunrise_soft.mp3"),
    ])
});

#[derive(Debug, Clone, Serialize)]
pub struct SessionAudio {
    pub track: String,
    pub volume: f32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub fade_in: f32,
    pub fade_out: f32,
    pub ducking: bool,
    pub visualization: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodAudio {
    pub track: String,
    pub volume: f32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub duration: f32,
    pub fade_in: f32,
    pub fade_out: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SosAudio {
    pub track: &'static str,
    pub volume: f32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub fade_in: f32,
    pub fade_out: f32,
    pub ducking: bool,
    pub visualization: &'static str,
    pub breathing_cycle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioSuggestion {
    pub track: String,
    pub volume: f32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub fade_in: f32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub file: &'static str,
    pub duration: u32,
    pub category: &'static str,
    pub description: &'static str,
}

/// Ambient track configuration for a guided session; unknown sessions fall
/// back to gentle rain.
pub fn session_audio(session_id: &str) -> SessionAudio {
    let key = session_id.to_lowercase().replace(' ', "_");
    let track = SESSION_AUDIO_MAP
        .get(key.as_str())
        .copied()
        .unwrap_or(DEFAULT_TRACK);

    SessionAudio {
        track: track.to_string(),
        volume: DEFAULT_VOLUME,
        looped: true,
        fade_in: FADE_IN_DURATION,
        fade_out: FADE_OUT_DURATION,
        ducking: true,
        visualization: "orb_pulse",
    }
}

/// Short feedback sound for a mood check-in.
pub fn mood_audio(mood_value: i32) -> MoodAudio {
    let track = match mood_value {
        1 | 2 => "soft_drop.mp3",
        4 | 5 => "chime_up.mp3",
        _ => "neutral_breath.mp3",
    };

    MoodAudio {
        track: track.to_string(),
        volume: 0.5,
        looped: false,
        duration: 2.0,
        fade_in: 0.3,
        fade_out: 0.5,
    }
}

/// SOS protocol audio: fast fade-in, slow guided breathing cycle.
pub fn sos_audio() -> SosAudio {
    SosAudio {
        track: "deep_piano.mp3",
        volume: 0.5,
        looped: true,
        fade_in: 0.5,
        fade_out: 3.0,
        ducking: true,
        visualization: "orb_breathing_slow",
        breathing_cycle: 3.0,
    }
}

pub fn suggest_by_emotion(emotion: &str) -> AudioSuggestion {
    let track = EMOTION_TRACK_MAP
        .get(emotion.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_TRACK);

    AudioSuggestion {
        track: track.to_string(),
        volume: DEFAULT_VOLUME,
        looped: true,
        fade_in: FADE_IN_DURATION,
        reason: format!("Recomendado para {}", emotion),
    }
}

pub fn available_tracks() -> &'static [TrackInfo] {
    static TRACKS: Lazy<Vec<TrackInfo>> = Lazy::new(|| {
        vec![
            TrackInfo {
                id: "gentle_rain",
                name: "Chuva Suave",
                file: "gentle_rain.mp3",
                duration: 300,
                category: "relaxation",
                description: "Chuva leve para relaxamento respiratório",
            },
            TrackInfo {
                id: "deep_piano",
                name: "Piano Profundo",
                file: "deep_piano.mp3",
                duration: 360,
                category: "calming",
                description: "Piano calmante para alívio emocional",
            },
            TrackInfo {
                id: "forest_birds",
                name: "Floresta",
                file: "forest_birds.mp3",
                duration: 420,
                category: "nature",
                description: "Floresta e pássaros para alívio de tensão",
            },
            TrackInfo {
                id: "ambient_ocean",
                name: "Oceano",
                file: "ambient_ocean.mp3",
                duration: 480,
                category: "focus",
                description: "Ondas suaves para foco e serenidade",
            },
            TrackInfo {
                id: "night_wind",
                name: "Vento Noturno",
                file: "night_wind.mp3",
                duration: 600,
                category: "sleep",
                description: "Vento noturno para indução ao sono",
            },
            TrackInfo {
                id: "sunrise_soft",
                name: "Amanhecer",
                file: "sunrise_soft.mp3",
                duration: 240,
                category: "energizing",
                description: "Acordar suave com energia positiva",
            },
        ]
    });

    &TRACKS
}
