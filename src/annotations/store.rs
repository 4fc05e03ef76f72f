//! Ordered annotation list with step-marker numbering

use crate::domain::{Annotation, Rect};

/// Ordered annotations plus the next step-marker number
///
/// Insertion order is z-order: index 0 is drawn first.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_step_number: u32,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self {
            annotations: Vec::new(),
            next_step_number: 1,
        }
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next committed step marker will receive
    pub fn next_step_number(&self) -> u32 {
        self.next_step_number
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn last(&self) -> Option<&Annotation> {
        self.annotations.last()
    }

    /// Append an annotation as-is
    ///
    /// Step markers must already carry their number; the counter is left
    /// alone. Use [`AnnotationStore::commit`] for freshly drawn annotations.
    pub fn append(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Append a freshly drawn annotation
    ///
    /// Step markers are stamped with the current counter, which then
    /// advances by one.
    pub fn commit(&mut self, mut annotation: Annotation) -> &Annotation {
        if let Annotation::StepMarker(marker) = &mut annotation {
            marker.number = self.next_step_number;
            self.next_step_number += 1;
        }
        self.annotations.push(annotation);
        &self.annotations[self.annotations.len() - 1]
    }

    /// Remove the last annotation
    ///
    /// Popping a step marker hands its number back to the counter. Other
    /// markers keep their numbers.
    pub fn pop_last(&mut self) -> Option<Annotation> {
        let popped = self.annotations.pop()?;
        if popped.is_step_marker() {
            self.next_step_number = self.next_step_number.saturating_sub(1).max(1);
        }
        Some(popped)
    }

    /// Remove every annotation and restart numbering at 1
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.next_step_number = 1;
    }

    /// Annotations that survive cropping to `rect`, moved into the cropped space
    ///
    /// An annotation survives only if its whole normalized bounding box lies
    /// inside `rect`. Survivors keep their order and are translated by
    /// `(-rect.x, -rect.y)`. The step counter is not touched, so numbering
    /// gaps are expected after a crop.
    pub fn crop_transform(&self, rect: &Rect) -> Vec<Annotation> {
        let rect = rect.normalized();
        self.annotations
            .iter()
            .filter(|annotation| rect.contains_rect(&annotation.bounds()))
            .map(|annotation| annotation.translated(-rect.x, -rect.y))
            .collect()
    }

    /// Swap in a new annotation list, keeping the step counter
    pub fn replace(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }
}
