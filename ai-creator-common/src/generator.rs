//! Placeholder article content assembled from fixed templates.
//!
//! An article is one introduction, one body and one conclusion, each picked
//! uniformly from a pool of [`POOL_SIZE`] templates and joined by blank lines.
//! Every occurrence of the topic placeholder is replaced with the topic verbatim.

use crate::model::blog::Topic;
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use std::{
    fmt::{Debug, Formatter},
    sync::{Mutex, PoisonError},
};

pub const POOL_SIZE: usize = 3;
pub const SECTION_SEPARATOR: &str = "\n\n";

const TOPIC_PLACEHOLDER: &str = "{topic}";

const INTRO_TEMPLATES: [&str; POOL_SIZE] = [
    "Welcome to this comprehensive exploration of {topic}. In today's digital landscape, \
     understanding {topic} has become increasingly important.",
    "{topic} has emerged as a fascinating subject that deserves our attention. Let's dive deep \
     into what makes {topic} so significant.",
    "Ever wondered about {topic}? This post will guide you through everything you need to know \
     about this important topic.",
];

const BODY_TEMPLATES: [&str; POOL_SIZE] = [
    "What makes {topic} particularly interesting is its wide-ranging applications and \
     implications. From technical aspects to practical implementations, {topic} offers numerous \
     opportunities for exploration and innovation.

Key points to consider:
• Understanding the fundamentals is crucial for success
• Real-world applications demonstrate the practical value
• Future developments promise even more exciting possibilities

The impact of {topic} extends far beyond what we might initially expect, influencing various \
     aspects of our daily lives and professional endeavors.",
    "When exploring {topic}, it's essential to consider both the current state and future \
     potential. The field has evolved significantly, and there are several important aspects \
     worth highlighting.

Core concepts include:
• Foundational principles that guide best practices
• Emerging trends that shape the future direction
• Practical considerations for implementation

As we continue to advance our understanding of {topic}, new opportunities and challenges \
     emerge that require thoughtful consideration.",
    "{topic} represents a dynamic field with numerous facets worth exploring. Whether you're just \
     starting your journey or looking to deepen your understanding, there's always something new \
     to discover.

Essential elements:
• Building a solid foundation of knowledge
• Staying current with latest developments
• Applying insights to real-world scenarios

The beauty of {topic} lies in its ability to adapt and evolve, making it a continuously \
     engaging subject for study and application.",
];

const CONCLUSION_TEMPLATES: [&str; POOL_SIZE] = [
    "As we conclude our exploration of {topic}, it's clear that this field offers tremendous \
     opportunities for growth and innovation. By staying informed and engaged, we can make the \
     most of what {topic} has to offer.",
    "In summary, {topic} presents both exciting possibilities and important considerations. The \
     key is to approach it with curiosity, critical thinking, and a commitment to continuous \
     learning.",
    "Thank you for joining me on this journey through {topic}. I hope this exploration has \
     provided valuable insights and inspired further investigation into this fascinating subject.",
];

/// Which template to use for each section.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct TemplateSelection {
    intro: usize,
    body: usize,
    conclusion: usize,
}

impl TemplateSelection {
    #[must_use]
    pub fn new(intro: usize, body: usize, conclusion: usize) -> Option<Self> {
        (intro < POOL_SIZE && body < POOL_SIZE && conclusion < POOL_SIZE).then_some(Self {
            intro,
            body,
            conclusion,
        })
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            intro: rng.random_range(0..POOL_SIZE),
            body: rng.random_range(0..POOL_SIZE),
            conclusion: rng.random_range(0..POOL_SIZE),
        }
    }

    #[must_use]
    pub fn intro(self) -> usize {
        self.intro
    }

    #[must_use]
    pub fn body(self) -> usize {
        self.body
    }

    #[must_use]
    pub fn conclusion(self) -> usize {
        self.conclusion
    }
}

#[must_use]
pub fn compose(topic: &Topic, selection: TemplateSelection) -> String {
    [
        INTRO_TEMPLATES[selection.intro],
        BODY_TEMPLATES[selection.body],
        CONCLUSION_TEMPLATES[selection.conclusion],
    ]
    .map(|template| template.replace(TOPIC_PLACEHOLDER, topic.get()))
    .join(SECTION_SEPARATOR)
}

pub struct ContentGenerator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl ContentGenerator {
    pub fn new(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// A generator whose sequence of articles is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn select(&self) -> TemplateSelection {
        // Rng state stays valid across a panic.
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng: &mut (dyn RngCore + Send) = &mut **guard;

        TemplateSelection::random(&mut rng)
    }

    /// No template references the author.
    pub fn generate(&self, topic: &Topic, _author: Option<&str>) -> String {
        compose(topic, self.select())
    }
}

impl Debug for ContentGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("rng", &"[opaque]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        generator::{
            BODY_TEMPLATES, CONCLUSION_TEMPLATES, ContentGenerator, INTRO_TEMPLATES, POOL_SIZE,
            SECTION_SEPARATOR, TemplateSelection, compose,
        },
        model::blog::Topic,
    };
    use std::collections::HashSet;

    fn topic(topic: &str) -> Topic {
        Topic::new(topic.to_owned()).unwrap()
    }

    fn selection(intro: usize, body: usize, conclusion: usize) -> TemplateSelection {
        TemplateSelection::new(intro, body, conclusion).unwrap()
    }

    fn all_selections() -> impl Iterator<Item = TemplateSelection> {
        (0..POOL_SIZE).flat_map(|intro| {
            (0..POOL_SIZE).flat_map(move |body| {
                (0..POOL_SIZE).map(move |conclusion| selection(intro, body, conclusion))
            })
        })
    }

    #[test]
    fn selection_bounds() {
        assert!(TemplateSelection::new(0, 1, 2).is_some());
        assert!(TemplateSelection::new(2, 2, 2).is_some());
        assert!(TemplateSelection::new(3, 0, 0).is_none());
        assert!(TemplateSelection::new(0, 3, 0).is_none());
        assert!(TemplateSelection::new(0, 0, usize::MAX).is_none());
    }

    #[test]
    fn compose_joins_three_sections() {
        let content = compose(&topic("Rust"), selection(0, 1, 2));

        let expected = [
            INTRO_TEMPLATES[0].replace("{topic}", "Rust"),
            BODY_TEMPLATES[1].replace("{topic}", "Rust"),
            CONCLUSION_TEMPLATES[2].replace("{topic}", "Rust"),
        ]
        .join(SECTION_SEPARATOR);
        assert_eq!(content, expected);
        assert!(content.starts_with("Welcome to this comprehensive exploration of Rust."));
        assert!(content.ends_with("into this fascinating subject."));
    }

    #[test]
    fn every_combination_mentions_topic_in_intro() {
        let topic = topic("Quantum Knitting");
        let mut contents = HashSet::new();

        for selection in all_selections() {
            let content = compose(&topic, selection);
            let intro = content.split(SECTION_SEPARATOR).next().unwrap();

            assert!(intro.contains("Quantum Knitting"), "{selection:?}");
            assert!(!content.contains("{topic}"), "{selection:?}");
            contents.insert(content);
        }

        assert_eq!(contents.len(), POOL_SIZE * POOL_SIZE * POOL_SIZE);
    }

    #[test]
    fn topic_is_interpolated_verbatim() {
        let content = compose(&topic("{topic} & <b>"), TemplateSelection::default());

        assert!(content.contains("exploration of {topic} & <b>."));
    }

    #[test]
    fn seeded_generators_agree() {
        let first = ContentGenerator::seeded(42);
        let second = ContentGenerator::seeded(42);
        let topic = topic("Rust");

        for _ in 0..20 {
            assert_eq!(first.generate(&topic, None), second.generate(&topic, Some("Ferris")));
        }
    }

    #[test]
    fn generated_content_varies() {
        let generator = ContentGenerator::from_os_rng();
        let topic = topic("Rust");

        let contents: HashSet<String> = (0..100)
            .map(|_| generator.generate(&topic, None))
            .collect();

        assert!(contents.len() > 1);
        for content in contents {
            assert!(content.contains("Rust"));
        }
    }

    #[test]
    fn random_selections_stay_in_bounds() {
        let generator = ContentGenerator::seeded(7);
        let selections: HashSet<TemplateSelection> =
            (0..1000).map(|_| generator.select()).collect();

        for selection in &selections {
            assert!(selection.intro() < POOL_SIZE);
            assert!(selection.body() < POOL_SIZE);
            assert!(selection.conclusion() < POOL_SIZE);
        }
        assert_eq!(selections.len(), POOL_SIZE * POOL_SIZE * POOL_SIZE);
    }
}
