//! Calculators that decode specs from part numbers and score them with the
//! weighted scorer.

use tracing::debug;

use crate::classify::ClassifiedPart;
use crate::model::{ComponentType, Specs};
use crate::scoring::{TypeMetadata, TypeMetadataRegistry};

use super::{Applicability, CalculatorResult, ScoringContext, SimilarityCalculator};

/// Decodes the specs of one component family from its part numbers.
pub trait SpecExtractor: Send + Sync {
    /// Calculator name reported in results and logs.
    const NAME: &'static str;

    /// Types the calculator claims. Claim only what `extract` can decode.
    fn applicability() -> Applicability;

    /// Metadata key used when the claimed part's own tag has no registration.
    fn metadata_key() -> ComponentType;

    /// Specs decoded from the part; empty when the number is not understood.
    fn extract(&self, part: &ClassifiedPart) -> Specs;
}

/// A [`SimilarityCalculator`] over a [`SpecExtractor`].
///
/// The claimed side's type (A preferred) selects the metadata. When the
/// metadata holds only symmetric rules the pair is scored both ways and the
/// lower score wins, so argument order never matters. Otherwise A is the
/// reference.
#[derive(Debug, Clone)]
pub struct SpecBasedCalculator<E> {
    extractor: E,
    applicability: Applicability,
}

impl<E: SpecExtractor> SpecBasedCalculator<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            applicability: E::applicability(),
        }
    }

    pub const fn extractor(&self) -> &E {
        &self.extractor
    }

    fn claimed<'p>(&self, first: &'p ClassifiedPart, second: &'p ClassifiedPart) -> &'p ClassifiedPart {
        match &first.component_type {
            Some(ty) if self.applicability.matches(ty) => first,
            _ => second,
        }
    }

    fn metadata_key(part: &ClassifiedPart, registry: &TypeMetadataRegistry) -> ComponentType {
        match &part.component_type {
            Some(ty) if registry.contains(ty) => ty.clone(),
            _ => E::metadata_key(),
        }
    }
}

impl<E: SpecExtractor + Default> Default for SpecBasedCalculator<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: SpecExtractor> SimilarityCalculator for SpecBasedCalculator<E> {
    fn name(&self) -> &'static str {
        E::NAME
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn calculate(
        &self,
        a: &ClassifiedPart,
        b: &ClassifiedPart,
        ctx: &ScoringContext<'_>,
    ) -> CalculatorResult {
        let specs_a = self.extractor.extract(a);
        let specs_b = self.extractor.extract(b);
        if specs_a.is_empty() && specs_b.is_empty() {
            debug!(
                calculator = E::NAME,
                mpn_a = %a.mpn,
                mpn_b = %b.mpn,
                "no specs decoded on either side, scoring part numbers as text"
            );
            return CalculatorResult::degraded(ctx.fallback.score(&a.mpn, &b.mpn));
        }

        let registry = ctx.scorer.registry();
        let forward_key = Self::metadata_key(self.claimed(a, b), registry);
        let reverse_key = Self::metadata_key(self.claimed(b, a), registry);
        let symmetric = |key: &ComponentType| {
            registry
                .lookup(key)
                .map_or(true, TypeMetadata::is_symmetric)
        };

        let forward = ctx
            .scorer
            .score_detailed(&forward_key, &specs_a, &specs_b, ctx.profile);
        if !(symmetric(&forward_key) && symmetric(&reverse_key)) {
            return CalculatorResult::scored(forward.total, forward);
        }
        let reverse = ctx
            .scorer
            .score_detailed(&reverse_key, &specs_b, &specs_a, ctx.profile);
        let lower = if reverse.total < forward.total {
            reverse
        } else {
            forward
        };
        CalculatorResult::scored(lower.total, lower)
    }
}
