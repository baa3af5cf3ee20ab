// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Readability scoring — a 0-100 heuristic over extracted text length, word
// count, and the share of noise characters typical of garbled OCR output.

use serde::Serialize;

/// Score for text too short to judge.
pub const DEGENERATE_SCORE: u8 = 10;
/// Starting point for text long enough to judge.
pub const BASE_SCORE: i32 = 50;
/// Largest bonus earned from word count.
pub const MAX_WORD_BONUS: usize = 20;
/// Noise ratio above which the penalty applies.
pub const NOISE_THRESHOLD: f64 = 0.3;
pub const NOISE_PENALTY: i32 = 20;

const MIN_LENGTH: usize = 10;
const MIN_WORDS: usize = 3;

/// Only these separate words. Form feeds and non-breaking spaces stay inside
/// a token.
const WORD_SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Raw measurements the score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityMetrics {
    /// Character count.
    pub length: usize,
    /// Non-empty tokens between spaces, tabs, and line breaks.
    pub word_count: usize,
    /// Characters that are neither letters, decimal digits, nor whitespace,
    /// over `length`.
    pub noise_ratio: f64,
}

impl ReadabilityMetrics {
    pub fn is_degenerate(&self) -> bool {
        self.length < MIN_LENGTH || self.word_count < MIN_WORDS
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityScorer;

impl ReadabilityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn measure(&self, text: &str) -> ReadabilityMetrics {
        let mut length = 0usize;
        let mut noise = 0usize;
        for c in text.chars() {
            length += 1;
            if !is_letter_or_digit(c) && !c.is_whitespace() {
                noise += 1;
            }
        }

        let noise_ratio = if length == 0 {
            0.0
        } else {
            noise as f64 / length as f64
        };

        ReadabilityMetrics {
            length,
            word_count: text
                .split(WORD_SEPARATORS)
                .filter(|token| !token.is_empty())
                .count(),
            noise_ratio,
        }
    }

    /// Score `text` in [0, 100]. Total over any input; `""` scores 10.
    pub fn score(&self, text: &str) -> u8 {
        let metrics = self.measure(text);
        if metrics.is_degenerate() {
            return DEGENERATE_SCORE;
        }

        let mut score = BASE_SCORE + (metrics.word_count / 10).min(MAX_WORD_BONUS) as i32;
        if metrics.noise_ratio > NOISE_THRESHOLD {
            score -= NOISE_PENALTY;
        }

        score.clamp(0, 100) as u8
    }
}

/// Vulgar fractions and superscripts are numeric but not digits; they count as
/// noise.
fn is_letter_or_digit(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}
