#![no_main]

use arbitrary::Arbitrary;
use jsonchain::{Chain, DecodeOptions, decode};
use libfuzzer_sys::fuzz_target;

/// One traversal step applied to the decoded document.
#[derive(Debug, Arbitrary)]
enum Step {
    Field(String),
    Index(u8),
    Slice(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    max_depth: u8,
    steps: Vec<Step>,
    document: &'a [u8],
}

fn walk(input: &Input<'_>) {
    let options = DecodeOptions::with_max_depth(usize::from(input.max_depth));
    let decoded = decode(input.document, options);

    // serde_json stops at 128 levels; below that both must agree on validity.
    if input.max_depth > 0 && input.max_depth < 128 {
        let theirs = serde_json::from_slice::<serde_json::Value>(input.document);
        if let (Err(ours), Ok(_)) = (&decoded, &theirs) {
            assert!(
                matches!(ours.reason(), jsonchain::SyntaxError::DepthExceeded(_)),
                "rejected a document serde_json accepts: {ours}"
            );
        }
        if let (Ok(_), Err(theirs)) = (&decoded, &theirs) {
            panic!("accepted a document serde_json rejects: {theirs}");
        }
    }

    if let Err(err) = &decoded {
        assert!(err.offset() <= input.document.len());
        assert!(err.line() >= 1 && err.column() >= 1);
    }

    let mut chain = Chain::from(&decoded);
    for step in &input.steps {
        let failed_before = chain.error().cloned();
        chain = match step {
            Step::Field(key) => chain.field(key),
            Step::Index(i) => chain.index(usize::from(*i)),
            Step::Slice(start, end) => chain.slice(usize::from(*start), usize::from(*end)),
        };
        if let Some(err) = failed_before {
            assert_eq!(chain.error(), Some(&err), "a later step replaced the first error");
        }
    }

    let _ = chain.raw();
    let _ = chain.as_str();
    let _ = chain.as_char();
    let _ = chain.as_i8();
    let _ = chain.as_u64();
    let _ = chain.as_f32();
    let _ = chain.as_object();
}

fuzz_target!(|input: Input<'_>| walk(&input));
