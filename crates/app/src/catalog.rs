use tutor_core::model::{SectionList, TutorialKey};

/// One tutorial page: its storage key, display title, and fixed section
/// order.
pub struct Tutorial {
    pub key: TutorialKey,
    pub title: &'static str,
    pub sections: SectionList,
}

fn tutorial(key: &str, title: &'static str, sections: &[&str]) -> Tutorial {
    Tutorial {
        key: TutorialKey::new(key),
        title,
        sections: SectionList::from_names(sections.iter().copied())
            .expect("catalog section lists are non-empty and duplicate-free"),
    }
}

/// Every tutorial this repository ships.
#[must_use]
pub fn all() -> Vec<Tutorial> {
    vec![
        tutorial(
            "clip",
            "Contrastive Language-Image Pretraining",
            &[
                "intro",
                "contrastive",
                "encoders",
                "training",
                "zeroshot",
                "applications",
            ],
        ),
        tutorial(
            "dpm",
            "Diffusion Probabilistic Models",
            &[
                "intro",
                "forward",
                "reverse",
                "math",
                "schedules",
                "applications",
            ],
        ),
        tutorial(
            "infonce",
            "The InfoNCE Loss",
            &[
                "intro",
                "math",
                "mechanics",
                "temperature",
                "symmetric",
                "implementation",
                "applications",
            ],
        ),
        tutorial(
            "ssm",
            "State-Space Sequence Models",
            &[
                "intro",
                "state",
                "discretization",
                "recurrent",
                "convolution",
                "training",
                "selective",
            ],
        ),
        tutorial(
            "transformer",
            "Attention & Transformers",
            &[
                "intro",
                "basics",
                "attention",
                "self-attention",
                "multi-head",
                "positional",
                "architecture",
                "examples",
            ],
        ),
        tutorial(
            "trm",
            "Recursive Tree Models",
            &[
                "intro",
                "recursion",
                "rnn-intro",
                "architecture",
                "forward",
                "training",
                "implementation",
            ],
        ),
    ]
}

/// Looks a tutorial up by its key.
#[must_use]
pub fn find(key: &str) -> Option<Tutorial> {
    all().into_iter().find(|t| t.key.as_str() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let tutorials = all();
        for (i, t) in tutorials.iter().enumerate() {
            assert!(
                !tutorials[..i].iter().any(|other| other.key == t.key),
                "duplicate key {}",
                t.key
            );
        }
    }

    #[test]
    fn every_tutorial_starts_at_intro() {
        for t in all() {
            assert_eq!(t.sections.first().as_str(), "intro", "{}", t.key);
        }
    }

    #[test]
    fn find_resolves_known_keys() {
        assert!(find("transformer").is_some());
        assert!(find("betamax").is_none());
    }
}
