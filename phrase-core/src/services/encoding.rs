use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde::Serialize;

use crate::error::{CoreError, Result};

#[derive(Debug, Serialize)]
pub struct EncodingCandidate {
    pub name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct EncodingDetectionResult {
    pub best: String,
    pub confidence: f32,
    pub candidates: Vec<EncodingCandidate>,
}

#[derive(Debug)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
}

fn guess(bytes: &[u8]) -> (&'static Encoding, Option<&'static Encoding>) {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let best = detector.guess(None, true);
    let legacy = detector.guess(None, false);
    (best, (legacy != best).then_some(legacy))
}

pub fn detect(bytes: &[u8]) -> EncodingDetectionResult {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let name = format!("{}-bom", encoding.name().to_lowercase());
        return EncodingDetectionResult {
            best: name.clone(),
            confidence: 0.99,
            candidates: vec![EncodingCandidate {
                name,
                confidence: 0.99,
            }],
        };
    }

    let (best, legacy) = guess(bytes);
    let confidence = estimate_confidence(bytes, best);

    let mut candidates = vec![EncodingCandidate {
        name: best.name().to_lowercase(),
        confidence,
    }];
    if let Some(alt) = legacy {
        candidates.push(EncodingCandidate {
            name: alt.name().to_lowercase(),
            confidence: estimate_confidence(bytes, alt).min(confidence - 0.05).max(0.0),
        });
    }

    EncodingDetectionResult {
        best: best.name().to_lowercase(),
        confidence,
        candidates,
    }
}

pub fn detect_from_file(path: &Path) -> Result<EncodingDetectionResult> {
    let bytes = fs::read(path)?;
    Ok(detect(&bytes))
}

/// Decodes bytes from an import file: BOM first, otherwise the detector's guess.
pub fn decode(bytes: &[u8]) -> Result<DecodedText> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => guess(bytes).0,
    };

    // decode() strips a BOM that matches the encoding
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(CoreError::Decode(format!(
            "input is not valid {}",
            used.name()
        )));
    }

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: used.name().to_lowercase(),
    })
}

pub fn decode_file(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}
