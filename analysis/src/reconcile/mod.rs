//! Reconciler: annotations checked against compiler hints
//!
//! Annotations are assertions and hints are evidence: only positions that
//! carry an annotation are inspected, and a hint with no annotation never
//! fails anything.
//!
//! | Annotation        | Violated when                          |
//! |-------------------|----------------------------------------|
//! | `no-escape`       | hints contain escapes/moved to heap    |
//! | `no-bounds-check` | hints contain `Found IsInBounds`       |
//! | `must-inline`     | hints do not contain an inlining call  |

pub mod report;

pub use report::{ReconcileReport, Violation};

use crate::annotations::{Annotation, AnnotationIndex};
use crate::hints::{CompilerHint, HintIndex};
use crate::sink::DiagnosticSink;

/// Whether `annotation` holds given the hints recorded at its position.
pub fn annotation_holds(annotation: Annotation, hints: &[CompilerHint]) -> bool {
    match annotation {
        Annotation::NoEscape => !hints.iter().any(CompilerHint::is_heap_allocation),
        Annotation::NoBoundsCheck => !hints.contains(&CompilerHint::FoundIsInBounds),
        Annotation::MustInline => hints.contains(&CompilerHint::Inlined),
    }
}

/// Check every annotation against the hints at its position.
///
/// Pure: no I/O, no logging. Violations come out in position order.
pub fn reconcile(hints: &HintIndex, annotations: &AnnotationIndex) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for (position, recorded) in annotations.iter() {
        let observed = hints.get(position);

        for &annotation in recorded {
            report.checked += 1;

            if !annotation_holds(annotation, observed) {
                report.violations.push(Violation {
                    position: position.clone(),
                    annotation,
                });
            }
        }
    }

    report
}

/// [`reconcile`], forwarding each violation to `sink`. Returns overall
/// validity.
pub fn compare_results(
    hints: &HintIndex,
    annotations: &AnnotationIndex,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    let report = reconcile(hints, annotations);
    let valid = report.is_valid();

    for violation in report.violations {
        sink.emit(violation.into());
    }

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::sink::Diagnostic;

    fn pos(line: usize) -> Position {
        Position::new("main.go", line)
    }

    fn standard_annotations() -> AnnotationIndex {
        [
            (pos(10), Annotation::NoEscape),
            (pos(15), Annotation::NoEscape),
            (pos(20), Annotation::NoBoundsCheck),
            (pos(25), Annotation::MustInline),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_annotation_holds_rules() {
        use CompilerHint::*;

        assert!(annotation_holds(Annotation::NoEscape, &[]));
        assert!(annotation_holds(Annotation::NoEscape, &[StaysOnStack, Inlined]));
        assert!(!annotation_holds(Annotation::NoEscape, &[EscapesToHeap]));
        assert!(!annotation_holds(Annotation::NoEscape, &[StaysOnStack, MovedToHeap]));

        assert!(annotation_holds(Annotation::NoBoundsCheck, &[]));
        assert!(!annotation_holds(Annotation::NoBoundsCheck, &[FoundIsInBounds]));

        assert!(!annotation_holds(Annotation::MustInline, &[]));
        assert!(!annotation_holds(Annotation::MustInline, &[StaysOnStack]));
        assert!(annotation_holds(Annotation::MustInline, &[MovedToHeap, Inlined]));
    }

    #[test]
    fn test_valid_cases() {
        let hints: HintIndex = [
            (pos(10), CompilerHint::StaysOnStack),
            (pos(15), CompilerHint::StaysOnStack),
            (pos(25), CompilerHint::Inlined),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&hints, &standard_annotations());
        assert!(report.is_valid(), "{}", report.summary());
        assert_eq!(report.checked, 4);
    }

    #[test]
    fn test_invalid_no_escape() {
        let hints: HintIndex = [
            (pos(10), CompilerHint::EscapesToHeap),
            (pos(15), CompilerHint::MovedToHeap),
            (pos(20), CompilerHint::StaysOnStack),
            (pos(25), CompilerHint::Inlined),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&hints, &standard_annotations());
        assert_eq!(
            report.violations,
            vec![
                Violation {
                    position: pos(10),
                    annotation: Annotation::NoEscape
                },
                Violation {
                    position: pos(15),
                    annotation: Annotation::NoEscape
                },
            ]
        );
    }

    #[test]
    fn test_invalid_no_bounds_check() {
        let hints: HintIndex = [
            (pos(10), CompilerHint::StaysOnStack),
            (pos(15), CompilerHint::StaysOnStack),
            (pos(20), CompilerHint::FoundIsInBounds),
            (pos(25), CompilerHint::Inlined),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&hints, &standard_annotations());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].annotation, Annotation::NoBoundsCheck);
        assert_eq!(report.violations[0].position, pos(20));
    }

    #[test]
    fn test_invalid_must_inline() {
        let hints: HintIndex = [
            (pos(10), CompilerHint::StaysOnStack),
            (pos(15), CompilerHint::StaysOnStack),
            (pos(20), CompilerHint::StaysOnStack),
            (pos(25), CompilerHint::StaysOnStack),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&hints, &standard_annotations());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].annotation, Annotation::MustInline);
    }

    #[test]
    fn test_must_inline_without_any_hints() {
        let annotations: AnnotationIndex =
            [(pos(3), Annotation::MustInline)].into_iter().collect();
        let report = reconcile(&HintIndex::new(), &annotations);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_hints_without_annotations_are_ignored() {
        let hints: HintIndex = [
            (pos(1), CompilerHint::EscapesToHeap),
            (pos(2), CompilerHint::FoundIsInBounds),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&hints, &AnnotationIndex::new());
        assert!(report.is_valid());
        assert_eq!(report.checked, 0);
    }

    #[test]
    fn test_duplicate_annotations_each_reported() {
        let annotations: AnnotationIndex = [
            (pos(7), Annotation::NoEscape),
            (pos(7), Annotation::NoEscape),
        ]
        .into_iter()
        .collect();
        let hints: HintIndex = [(pos(7), CompilerHint::MovedToHeap)].into_iter().collect();

        let report = reconcile(&hints, &annotations);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn test_other_file_same_line_does_not_match() {
        let annotations: AnnotationIndex =
            [(Position::new("a.go", 5), Annotation::NoEscape)].into_iter().collect();
        let hints: HintIndex = [(Position::new("b.go", 5), CompilerHint::MovedToHeap)]
            .into_iter()
            .collect();

        assert!(reconcile(&hints, &annotations).is_valid());
    }

    #[test]
    fn test_compare_results_emits_messages_in_position_order() {
        let annotations: AnnotationIndex = [
            (Position::new("b.go", 1), Annotation::MustInline),
            (Position::new("a.go", 9), Annotation::MustInline),
            (Position::new("a.go", 2), Annotation::MustInline),
        ]
        .into_iter()
        .collect();

        let mut sink: Vec<Diagnostic> = Vec::new();
        let valid = compare_results(&HintIndex::new(), &annotations, &mut sink);

        assert!(!valid);
        let lines: Vec<String> = sink.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "function at a.go:2 is marked as must-inline but is not inlined",
                "function at a.go:9 is marked as must-inline but is not inlined",
                "function at b.go:1 is marked as must-inline but is not inlined",
            ]
        );
    }

    #[test]
    fn test_compare_results_valid_emits_nothing() {
        let annotations: AnnotationIndex =
            [(pos(10), Annotation::NoEscape)].into_iter().collect();
        let hints: HintIndex = [(pos(10), CompilerHint::StaysOnStack)].into_iter().collect();

        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(compare_results(&hints, &annotations, &mut sink));
        assert!(sink.is_empty());
    }
}
