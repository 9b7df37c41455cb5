use std::env;

use ocr2gpt_types::BackendKind;
use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_tesseract_command() -> String {
    "tesseract".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["eng".to_string(), "jpn".to_string()]
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_prompt() -> String {
    "Extract all of the text visible in this screenshot. Reply with the text only.".to_string()
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RecognitionConfig {
    pub backend: BackendKind,
    pub tesseract: TesseractConfig,
    pub vision: VisionConfig,
}

impl RecognitionConfig {
    pub fn new() -> Self {
        let backend = env_parse("RECOGNITION_BACKEND").unwrap_or_default();

        Self {
            backend,
            tesseract: TesseractConfig::new(),
            vision: VisionConfig::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TesseractConfig {
    /// Executable name or absolute path
    #[serde(default = "default_tesseract_command")]
    pub command: String,
    /// Tesseract language packs, joined with '+' on the command line
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl TesseractConfig {
    pub fn new() -> Self {
        let command = env::var("TESSERACT_CMD").unwrap_or_else(|_| default_tesseract_command());

        let languages = env::var("TESSERACT_LANGS")
            .ok()
            .map(|v| {
                v.split('+')
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(default_languages);

        Self { command, languages }
    }
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            command: default_tesseract_command(),
            languages: default_languages(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VisionConfig {
    /// Chat-completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Response token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Never written back out; supply it through API_KEY or a hand-written config file
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Instruction sent alongside every image
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl VisionConfig {
    pub fn new() -> Self {
        let api_url = env::var("VISION_API_URL").unwrap_or_else(|_| default_api_url());
        let model = env::var("VISION_MODEL").unwrap_or_else(|_| default_model());
        let max_tokens = env_parse("VISION_MAX_TOKENS").unwrap_or_else(default_max_tokens);
        let api_key = env::var("API_KEY").unwrap_or_default();
        let prompt = env::var("VISION_PROMPT").unwrap_or_else(|_| default_prompt());

        Self {
            api_url,
            model,
            max_tokens,
            api_key,
            prompt,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: String::new(),
            prompt: default_prompt(),
        }
    }
}
