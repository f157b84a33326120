//! Query composition from collected conversation fields.
//!
//! Pure and side-effect-free: building a query never touches the network,
//! and identical fields always produce identical queries. The relaxed
//! variant is the single fallback query, not a ladder.

use findly_core::types::{CategoryClass, Language};
use serde::{Deserialize, Serialize};

/// File-type hint appended for book-like categories.
const BOOK_HINT: &str = "filetype:pdf OR filetype:epub";
/// File-type hint appended for presentation-like categories.
const PRESENTATION_HINT: &str = "filetype:ppt OR filetype:pptx";
/// Site restriction substituted for video-like categories.
const VIDEO_SITE: &str = "site:youtube.com";

/// The completed fields of one conversation cycle, as the search layer
/// consumes them. The dialog crate converts its session into this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Language selected for the cycle; the encyclopedia provider queries
    /// this language's edition.
    pub language: Language,
    /// School subject, free text ("biology").
    pub subject: String,
    /// Category display text exactly as the user entered it.
    pub category: String,
    /// Stable class decided when the category was collected.
    pub category_class: CategoryClass,
    /// Topic, free text ("cell division").
    pub topic: String,
}

/// An immutable provider query.
///
/// Built fresh per search attempt; a relaxed retry constructs a new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Ordered search terms.
    pub base_terms: Vec<String>,
    /// Operator hints appended after the base terms.
    pub augmentations: Vec<String>,
}

impl Query {
    /// Flatten the query into the provider's free-text form:
    /// base terms, then augmentations, space-joined.
    pub fn as_text(&self) -> String {
        let mut parts: Vec<&str> = self.base_terms.iter().map(String::as_str).collect();
        parts.extend(self.augmentations.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Build the primary query: `[subject, topic, category]` plus
/// category-conditioned augmentation.
///
/// The category token stays in the base terms as a search hint, except for
/// video-like categories, where the base terms are replaced wholesale with
/// a site-restricted pair.
pub fn primary(req: &SearchRequest) -> Query {
    match req.category_class {
        CategoryClass::Video => Query {
            base_terms: vec![
                VIDEO_SITE.to_string(),
                req.subject.clone(),
                req.topic.clone(),
            ],
            augmentations: Vec::new(),
        },
        class => {
            let augmentations = match class {
                CategoryClass::Book => vec![BOOK_HINT.to_string()],
                CategoryClass::Presentation => vec![PRESENTATION_HINT.to_string()],
                _ => Vec::new(),
            };
            Query {
                base_terms: vec![req.subject.clone(), req.topic.clone(), req.category.clone()],
                augmentations,
            }
        }
    }
}

/// Build the relaxed fallback query: `[subject, topic]`, no category term,
/// no augmentation.
pub fn relaxed(req: &SearchRequest) -> Query {
    Query {
        base_terms: vec![req.subject.clone(), req.topic.clone()],
        augmentations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: &str, class: CategoryClass) -> SearchRequest {
        SearchRequest {
            language: Language::En,
            subject: "biology".to_string(),
            category: category.to_string(),
            category_class: class,
            topic: "cell division".to_string(),
        }
    }

    #[test]
    fn test_book_query_gets_pdf_hint() {
        let query = primary(&request("Book", CategoryClass::Book));
        assert_eq!(query.base_terms, vec!["biology", "cell division", "Book"]);
        assert_eq!(query.augmentations, vec![BOOK_HINT]);
        assert_eq!(
            query.as_text(),
            "biology cell division Book filetype:pdf OR filetype:epub"
        );
    }

    #[test]
    fn test_presentation_query_gets_ppt_hint() {
        let query = primary(&request("Презентация", CategoryClass::Presentation));
        assert_eq!(query.augmentations, vec![PRESENTATION_HINT]);
    }

    #[test]
    fn test_video_query_replaces_base_terms() {
        let query = primary(&request("Video clip", CategoryClass::Video));
        assert_eq!(
            query.base_terms,
            vec!["site:youtube.com", "biology", "cell division"]
        );
        assert!(query.augmentations.is_empty());
    }

    #[test]
    fn test_article_query_has_no_augmentation() {
        let query = primary(&request("Maqola", CategoryClass::Article));
        assert_eq!(
            query.base_terms,
            vec!["biology", "cell division", "Maqola"]
        );
        assert!(query.augmentations.is_empty());
    }

    #[test]
    fn test_relaxed_drops_category_and_augmentation() {
        let req = request("Book", CategoryClass::Book);
        let query = relaxed(&req);
        assert_eq!(query.base_terms, vec!["biology", "cell division"]);
        assert!(query.augmentations.is_empty());
    }

    #[test]
    fn test_relaxed_terms_are_subset_of_primary() {
        for class in [
            CategoryClass::Article,
            CategoryClass::Book,
            CategoryClass::Presentation,
            CategoryClass::Video,
        ] {
            let req = request("anything", class);
            let p = primary(&req);
            let r = relaxed(&req);
            assert!(r.augmentations.is_empty());
            for term in &r.base_terms {
                assert!(p.base_terms.contains(term), "{term} missing for {class:?}");
            }
        }
    }

    #[test]
    fn test_builder_is_deterministic() {
        let req = request("Kitob", CategoryClass::Book);
        assert_eq!(primary(&req), primary(&req));
        assert_eq!(relaxed(&req), relaxed(&req));
        assert_eq!(primary(&req).as_text(), primary(&req).as_text());
    }
}
