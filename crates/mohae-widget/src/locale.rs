//! Static copy for the supported locales
//!
//! No detection happens here: callers pick a [`Language`] explicitly and
//! anything unrecognised falls back to [`Language::En`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported widget locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    En,
    /// Korean
    Ko,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::En, Language::Ko];

    /// BCP 47 tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }

    /// Resolve an optional tag, falling back to the default locale when the
    /// tag is absent or unsupported.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }

    /// Copy table for this language
    pub fn copy(&self) -> &'static LocaleCopy {
        match self {
            Language::En => &ENGLISH,
            Language::Ko => &KOREAN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unsupported language tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected 'en' or 'ko')")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ko" => Ok(Language::Ko),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Icon shown next to a starter prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptIcon {
    Calendar,
    Lifesaver,
    Sparkle,
}

/// Suggestion shown on the widget start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarterPrompt {
    pub label: &'static str,
    pub prompt: &'static str,
    pub icon: PromptIcon,
}

/// All user-facing copy for one locale
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleCopy {
    /// Widget header title
    pub header_title: &'static str,
    /// Start screen greeting
    pub greeting: &'static str,
    /// Composer placeholder
    pub placeholder: &'static str,
    /// Start screen suggestions
    pub prompts: &'static [StarterPrompt],
    /// Heading of the section around the widget
    pub section_title: &'static str,
    /// Description under the section heading
    pub section_description: &'static str,
}

pub static ENGLISH: LocaleCopy = LocaleCopy {
    header_title: "Woori Mohae Concierge",
    greeting: "Annyeong! Share your crew’s ages, routines, preferences, and timing—I’ll stitch together a balanced plan.",
    placeholder: "Tell me your family’s ages, neighborhood or subway line, routines, and any must-haves…",
    prompts: &[
        StarterPrompt {
            label: "Seoul Saturday blueprint",
            prompt: "We’re based near Seoul Forest with kids 3 and 8. Craft a Saturday plan with outdoor play, culture, and a calm evening wind-down.",
            icon: PromptIcon::Calendar,
        },
        StarterPrompt {
            label: "Rain-ready routines",
            prompt: "It’s expected to rain in Busan. Design a Sunday itinerary for siblings aged 2 and 6 that balances energy, meals, and indoor adventures.",
            icon: PromptIcon::Lifesaver,
        },
        StarterPrompt {
            label: "Half-day Daegu dash",
            prompt: "We only have Sunday afternoon in Daegu. Suggest two can’t-miss experiences plus reminders for naps and dinner.",
            icon: PromptIcon::Sparkle,
        },
    ],
    section_title: "Plan your family's day with one conversation.",
    section_description: "Share your kids’ ages, neighbourhood, routines, and any must-haves. I’ll ask follow-up questions, then return a balanced itinerary with weather-aware backups.",
};

pub static KOREAN: LocaleCopy = LocaleCopy {
    header_title: "우리 뭐해 컨시어지",
    greeting: "안녕하세요! 아이들 나이, 생활 루틴, 취향과 가능한 시간을 알려 주세요. 균형 잡힌 일정으로 엮어 드릴게요.",
    placeholder: "아이 나이, 사는 동네나 지하철 노선, 루틴, 꼭 넣고 싶은 일정을 알려 주세요…",
    prompts: &[
        StarterPrompt {
            label: "서울 토요일 플랜",
            prompt: "서울숲 근처에 살고 아이는 3살, 8살이에요. 바깥 놀이와 문화 체험, 차분한 저녁 마무리까지 담은 토요일 일정을 짜 주세요.",
            icon: PromptIcon::Calendar,
        },
        StarterPrompt {
            label: "비 오는 날 루틴",
            prompt: "부산에 비 소식이 있어요. 2살, 6살 남매를 위해 에너지 소모, 식사, 실내 놀이가 균형 잡힌 일요일 일정을 만들어 주세요.",
            icon: PromptIcon::Lifesaver,
        },
        StarterPrompt {
            label: "대구 반나절 코스",
            prompt: "대구에서 일요일 오후만 시간이 있어요. 꼭 가 볼 만한 체험 두 가지와 낮잠, 저녁 시간 알림을 함께 추천해 주세요.",
            icon: PromptIcon::Sparkle,
        },
    ],
    section_title: "대화 한 번으로 가족 하루를 계획하세요.",
    section_description: "아이 나이, 사는 지역, 루틴과 꼭 포함하고 싶은 내용을 알려 주세요. 필요한 내용을 확인한 뒤 날씨 대비 플랜까지 담은 일정을 안내해 드릴게요.",
};
