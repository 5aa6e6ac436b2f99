//! Property tests for segmentation

use proptest::prelude::*;
use txtpub_core::packager::package;
use txtpub_core::segmenter::segment;
use txtpub_core::{BookMetadata, Language};

/// Lines mixing headings, prose, blank lines and odd whitespace
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "Chapter [0-9]{1,3}[ a-zA-Z]{0,12}",
        "[ \t]{0,3}Chapter [IVX]{1,4}",
        "第[一二三四五六七八九十百零]{1,4}[章回节卷] ?[\u{4e00}-\u{4e20}]{0,6}",
        "[ 　]{0,2}卷[0-9]{1,2}[部集]",
        "[a-zA-Z ,.]{0,40}",
        "[\u{4e00}-\u{4e80}，。]{0,20}",
        "[ \t　]{0,4}",
        Just("See Chapter 3 for details".to_string()),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(line_strategy(), 0..40),
        prop_oneof![Just("\n"), Just("\r\n")],
        any::<bool>(),
    )
        .prop_map(|(lines, newline, trailing)| {
            let mut text = lines.join(newline);
            if trailing {
                text.push_str(newline);
            }
            text
        })
}

proptest! {
    #[test]
    fn split_is_lossless(text in text_strategy()) {
        for language in Language::ALL {
            let segmentation = segment(&text, language);
            prop_assert_eq!(segmentation.reassemble(), text.clone());
        }
    }

    #[test]
    fn sequence_indices_have_no_gaps(text in text_strategy()) {
        for language in Language::ALL {
            let segmentation = segment(&text, language);
            for (position, chapter) in segmentation.chapters.iter().enumerate() {
                prop_assert_eq!(chapter.sequence_index, position + 1);
            }
        }
    }

    #[test]
    fn headings_are_single_trimmed_lines(text in text_strategy()) {
        for language in Language::ALL {
            for chapter in segment(&text, language).chapters {
                prop_assert!(!chapter.heading.contains('\n'));
                prop_assert_eq!(chapter.heading.trim_end(), chapter.heading.as_str());
                prop_assert!(chapter.indent.trim().is_empty());
                prop_assert!(chapter.separator.trim().is_empty());
            }
        }
    }

    #[test]
    fn package_mirrors_chapters(text in text_strategy()) {
        let segmentation = segment(&text, Language::English);
        let package = package(&segmentation.chapters, BookMetadata::new("P", Language::English)).unwrap();

        prop_assert_eq!(package.units.len(), segmentation.chapters.len());
        prop_assert_eq!(package.toc.len(), segmentation.chapters.len());
        prop_assert_eq!(package.spine.len(), segmentation.chapters.len() + 1);
        for (entry, chapter) in package.toc.iter().zip(&segmentation.chapters) {
            prop_assert_eq!(&entry.label, &chapter.heading);
        }
    }
}
