//! Fixed backup candidates shown whenever generation fails.
//!
//! Single source of truth for both the server-side fallback path and the
//! page shell's own last-resort list (injected into the page at render
//! time), so the two layers can never drift apart.

use lazy_static::lazy_static;

use crate::name::NameCandidate;

lazy_static! {
    static ref FALLBACK_NAMES: Vec<NameCandidate> = vec![
        NameCandidate {
            name: "志远".to_string(),
            pinyin: "Zhì Yuǎn".to_string(),
            meaning: "胸怀远志，勇于探索未知领域".to_string(),
        },
        NameCandidate {
            name: "思雅".to_string(),
            pinyin: "Sī Yǎ".to_string(),
            meaning: "思维敏捷，举止优雅得体".to_string(),
        },
        NameCandidate {
            name: "晨光".to_string(),
            pinyin: "Chén Guāng".to_string(),
            meaning: "如晨曦之光，带来希望与活力".to_string(),
        },
        NameCandidate {
            name: "悦心".to_string(),
            pinyin: "Yuè Xīn".to_string(),
            meaning: "心情愉悦，给人带来快乐".to_string(),
        },
    ];
}

pub fn fallback_names() -> Vec<NameCandidate> {
    FALLBACK_NAMES.clone()
}
