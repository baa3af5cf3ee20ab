// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rule-based document classification.
//
// Rules are evaluated in a fixed priority order and the first match wins:
// Photo, Identity, Invoice, AddressProof, then Unknown. The categories overlap
// on keyword content ("rg" occurs inside "energia"), so order decides.

use std::sync::LazyLock;

use doclens_core::{DocumentType, is_image_extension};
use regex::Regex;
use serde::Serialize;

const IDENTITY_KEYWORDS: &[&str] = &[
    "identidade",
    "rg",
    "cpf",
    "carteira",
    "nacional",
    "habilitação",
    "cnh",
    "passaporte",
    "documento de identidade",
    "registro geral",
];

const INVOICE_KEYWORDS: &[&str] = &[
    "nota fiscal",
    "nf-e",
    "nfe",
    "danfe",
    "cnpj",
    "imposto",
    "icms",
    "valor total",
    "item",
    "quantidade",
    "preço unitário",
];

const ADDRESS_PROOF_KEYWORDS: &[&str] = &[
    "conta",
    "fatura",
    "energia",
    "água",
    "gás",
    "telefone",
    "internet",
    "residencial",
    "endereço",
    "cep",
];

/// Brazilian postal code (CEP): five digits, optional hyphen, three digits.
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5}-?\d{3}").expect("postal code pattern is valid"));

/// How a rule decides whether it applies.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Image file whose extracted text is blank.
    ImageWithoutText,
    /// Lowercased text contains any keyword.
    Keywords(&'static [&'static str]),
    /// Any keyword, or a postal code anywhere in the text.
    KeywordsOrPostalCode(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    document_type: DocumentType,
    matcher: Matcher,
}

/// Priority list. Order is significant.
const RULES: &[Rule] = &[
    Rule {
        document_type: DocumentType::Photo,
        matcher: Matcher::ImageWithoutText,
    },
    Rule {
        document_type: DocumentType::Identity,
        matcher: Matcher::Keywords(IDENTITY_KEYWORDS),
    },
    Rule {
        document_type: DocumentType::Invoice,
        matcher: Matcher::Keywords(INVOICE_KEYWORDS),
    },
    Rule {
        document_type: DocumentType::AddressProof,
        matcher: Matcher::KeywordsOrPostalCode(ADDRESS_PROOF_KEYWORDS),
    },
];

/// The label assigned to a document plus what triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub document_type: DocumentType,
    /// Keywords of the winning rule found in the text.
    pub matched_keywords: Vec<&'static str>,
    /// Whether a postal code contributed to the match.
    pub matched_postal_code: bool,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            document_type: DocumentType::Unknown,
            matched_keywords: Vec::new(),
            matched_postal_code: false,
        }
    }
}

/// Stateless keyword/pattern classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Assign a document type to `text` extracted from a file with `extension`.
    ///
    /// `extension` may carry a leading dot and any case.
    pub fn classify(&self, text: &str, extension: Option<&str>) -> DocumentType {
        self.explain(text, extension).document_type
    }

    /// Like [`classify`](Self::classify), also reporting the matched evidence.
    pub fn explain(&self, text: &str, extension: Option<&str>) -> Classification {
        let blank = text.trim().is_empty();
        let is_image = extension.is_some_and(is_image_extension);
        let normalized = text.to_lowercase();

        for rule in RULES {
            let matched = match rule.matcher {
                Matcher::ImageWithoutText => (is_image && blank).then_some((Vec::new(), false)),
                // Keyword rules never fire on blank text.
                _ if blank => None,
                Matcher::Keywords(keywords) => {
                    let hits = matching_keywords(&normalized, keywords);
                    (!hits.is_empty()).then_some((hits, false))
                }
                Matcher::KeywordsOrPostalCode(keywords) => {
                    let hits = matching_keywords(&normalized, keywords);
                    let postal = POSTAL_CODE_RE.is_match(text);
                    (!hits.is_empty() || postal).then_some((hits, postal))
                }
            };

            if let Some((matched_keywords, matched_postal_code)) = matched {
                return Classification {
                    document_type: rule.document_type,
                    matched_keywords,
                    matched_postal_code,
                };
            }
        }

        Classification::unknown()
    }
}

/// Plain substring containment; a keyword inside a longer word still counts.
fn matching_keywords(normalized: &str, keywords: &'static [&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|keyword| normalized.contains(keyword))
        .collect()
}
