//! Translation collaborator: detect the source language, translate into the
//! fixed target set minus the source, one external API call per language.
//! No retries here, failures surface to the caller as a single error.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const API_TIMEOUT: Duration = Duration::from_secs(10);
const API_BASE: &str = "https://translation.googleapis.com/language/translate/v2";

/// The group languages. Replies quote each translation under its own label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ko,
    ZhCn,
    Km,
    Vi,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Lang::Ko, Lang::ZhCn, Lang::Km, Lang::Vi];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::ZhCn => "zh-CN",
            Lang::Km => "km",
            Lang::Vi => "vi",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Lang::Ko => "한국어",
            Lang::ZhCn => "中文",
            Lang::Km => "ភាសាខ្មែរ",
            Lang::Vi => "Tiếng Việt",
        }
    }
}

#[derive(Debug)]
pub struct Translation {
    pub lang: Lang,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation api: {0}")]
    Api(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Detect the source language of `text` and translate it into every
    /// other group language, in [`Lang::ALL`] order
    async fn translate(&self, text: &str) -> Result<Vec<Translation>, Error>;
}

#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: Client,
    api_key: String,
}

impl GoogleTranslate {
    pub fn new(api_key: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(API_TIMEOUT).build()?,
            api_key: api_key.to_string(),
        })
    }
    async fn detect(&self, text: &str) -> Result<String, Error> {
        let res: DetectResponse = self
            .client
            .post(format!("{API_BASE}/detect"))
            .query(&[("key", self.api_key.as_str())])
            .form(&[("q", text)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        res.data
            .detections
            .into_iter()
            .flatten()
            .next()
            .map(|d| d.language)
            .ok_or_else(|| Error::Api("empty detection response".to_string()))
    }
    async fn translate_one(&self, text: &str, source: &str, target: Lang) -> Result<String, Error> {
        let res: TranslateResponse = self
            .client
            .post(API_BASE)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("q", text),
                ("source", source),
                ("target", target.code()),
                ("format", "text"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        res.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| Error::Api("empty translation response".to_string()))
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str) -> Result<Vec<Translation>, Error> {
        let source = self.detect(text).await?;
        log::debug!("detected source language {source}");

        let mut out = Vec::new();
        for lang in targets_for(&source) {
            let text = self.translate_one(text, &source, lang).await?;
            out.push(Translation { lang, text });
        }
        Ok(out)
    }
}

/// Every group language except the detected source
fn targets_for(source: &str) -> Vec<Lang> {
    Lang::ALL
        .into_iter()
        .filter(|lang| !lang.code().starts_with(source))
        .collect()
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    detections: Vec<Vec<Detection>>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_for() {
        let table = [
            ("ko", vec![Lang::ZhCn, Lang::Km, Lang::Vi]),
            ("zh", vec![Lang::Ko, Lang::Km, Lang::Vi]),
            ("zh-CN", vec![Lang::Ko, Lang::Km, Lang::Vi]),
            ("vi", vec![Lang::Ko, Lang::ZhCn, Lang::Km]),
            // unknown source translates into every group language
            ("en", vec![Lang::Ko, Lang::ZhCn, Lang::Km, Lang::Vi]),
        ];
        for (i, (source, expected)) in table.into_iter().enumerate() {
            assert_eq!(targets_for(source), expected, "test table[{i}]");
        }
    }
}
