//! Criteria evaluation service

use crate::operators::{intersect, matches, union, MatchSet};
use crate::{Criteria, EvalError, EvalResult, EvaluationListener, EvaluationOptions, LeafCriteria};
use log::{debug, trace, warn};
use octofhir_logic_ast::LogicalOperator;
use octofhir_logic_model::{AsyncObservationSource, Observation, ObservationSource, Snapshot};
use std::sync::Arc;

/// Evaluates criteria against an injected observation source
///
/// The service holds no per-request state; one instance can serve
/// concurrent evaluations.
pub struct LogicService<S> {
    source: S,
    options: EvaluationOptions,
    listeners: Vec<Arc<dyn EvaluationListener>>,
}

impl<S: ObservationSource> LogicService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: EvaluationOptions::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn EvaluationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Observations satisfying the criteria, in the source's order
    pub fn evaluate(&self, criteria: &Criteria) -> EvalResult<Vec<Observation>> {
        self.observations(criteria, None)
    }

    /// Like [`evaluate`](Self::evaluate), with every fetch scoped to one subject
    pub fn evaluate_for(&self, subject: &str, criteria: &Criteria) -> EvalResult<Vec<Observation>> {
        self.observations(criteria, Some(subject))
    }

    /// Subjects with matching observations
    ///
    /// A leaf selects the subjects owning at least one matching observation;
    /// AND intersects and OR unions those subject sets. Observations without
    /// a subject are ignored.
    pub fn cohort(&self, criteria: &Criteria) -> EvalResult<Vec<String>> {
        check_depth(criteria, &self.options)?;
        self.notify(|l| l.will_evaluate(criteria));

        let subjects = self.combine(criteria, &mut |leaf: &LeafCriteria| -> EvalResult<MatchSet<()>> {
            let mut subjects = MatchSet::new();
            for obs in self.fetch_matching(leaf, None)? {
                if let Some(subject) = obs.subject {
                    subjects.entry(subject).or_insert(());
                }
            }
            Ok(subjects)
        })?;

        debug!("cohort of {} subject(s) for {criteria}", subjects.len());
        self.notify(|l| l.did_evaluate(criteria, subjects.len()));
        Ok(subjects.into_keys().collect())
    }

    fn observations(&self, criteria: &Criteria, subject: Option<&str>) -> EvalResult<Vec<Observation>> {
        check_depth(criteria, &self.options)?;
        self.notify(|l| l.will_evaluate(criteria));

        let matched = self.combine(criteria, &mut |leaf: &LeafCriteria| -> EvalResult<MatchSet<Observation>> {
            let mut matched = MatchSet::new();
            for obs in self.fetch_matching(leaf, subject)? {
                matched.entry(obs.id.clone()).or_insert(obs);
            }
            Ok(matched)
        })?;

        debug!("{} observation(s) match {criteria}", matched.len());
        self.notify(|l| l.did_evaluate(criteria, matched.len()));
        Ok(matched.into_values().collect())
    }

    /// Evaluate a tree bottom-up, leaves through `leaf_fn`
    fn combine<T, F>(&self, criteria: &Criteria, leaf_fn: &mut F) -> EvalResult<MatchSet<T>>
    where
        F: FnMut(&LeafCriteria) -> EvalResult<MatchSet<T>>,
    {
        let composite = match criteria {
            Criteria::Leaf(leaf) => return leaf_fn(leaf),
            Criteria::Composite(composite) => composite,
        };

        let mut children = composite.children().iter();
        let Some(first) = children.next() else {
            return Err(EvalError::Internal("composite criteria without children".into()));
        };
        let mut acc = self.combine(first, leaf_fn)?;

        for child in children {
            match composite.operator() {
                LogicalOperator::And => {
                    if acc.is_empty() {
                        trace!("AND short-circuits, remaining children skipped");
                        break;
                    }
                    let next = self.combine(child, leaf_fn)?;
                    acc = intersect(acc, &next);
                }
                LogicalOperator::Or => {
                    let next = self.combine(child, leaf_fn)?;
                    acc = union(acc, next);
                }
            }
        }
        Ok(acc)
    }

    /// Fetch a leaf's observations and keep those satisfying it
    fn fetch_matching(&self, leaf: &LeafCriteria, subject: Option<&str>) -> EvalResult<Vec<Observation>> {
        let query = leaf.query(subject);
        let fetched = self.source.fetch(&query)?;
        trace!("fetched {} observation(s) for {query}", fetched.len());
        self.notify(|l| l.did_fetch(&query, fetched.len()));

        Ok(fetched
            .into_iter()
            .filter(|obs| self.leaf_matches(leaf, obs))
            .collect())
    }

    fn leaf_matches(&self, leaf: &LeafCriteria, obs: &Observation) -> bool {
        if self.options.enforce_windows && !leaf.window().contains(&obs.observed_at) {
            return false;
        }
        let matched = matches(leaf.operator(), obs.value.as_ref(), leaf.operand());
        if let Some(value) = &obs.value
            && value.semantic_type() != leaf.reference().semantic_type
        {
            warn!(
                "observation '{}' of '{}' has a {} value, expected {}; skipped",
                obs.id,
                leaf.reference().name,
                value.semantic_type(),
                leaf.reference().semantic_type
            );
        }
        matched
    }

    fn notify(&self, event: impl Fn(&dyn EvaluationListener)) {
        for listener in &self.listeners {
            event(listener.as_ref());
        }
    }
}

fn check_depth(criteria: &Criteria, options: &EvaluationOptions) -> EvalResult<()> {
    let depth = criteria.depth();
    if depth > options.max_depth {
        return Err(EvalError::RecursionLimit {
            depth,
            max: options.max_depth,
        });
    }
    Ok(())
}

/// Evaluate against an asynchronous source
///
/// Every query the criteria may issue is fetched concurrently into a
/// [`Snapshot`] first; evaluation then runs over the snapshot. The depth
/// limit is checked before anything is fetched.
pub async fn evaluate_async<A>(
    source: &A,
    criteria: &Criteria,
    subject: Option<&str>,
    options: EvaluationOptions,
) -> EvalResult<Vec<Observation>>
where
    A: AsyncObservationSource + ?Sized,
{
    check_depth(criteria, &options)?;

    let snapshot = Snapshot::load(source, criteria.queries(subject)).await?;
    LogicService::new(snapshot)
        .with_options(options)
        .observations(criteria, subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_logic_ast::ComparisonOperator;
    use octofhir_logic_model::DataReference;
    use octofhir_logic_types::SemanticType;

    #[test]
    fn test_check_depth_is_inclusive() {
        let leaf = Criteria::leaf(
            DataReference::new("WEIGHT", SemanticType::Numeric),
            ComparisonOperator::LessThan,
            60,
        )
        .unwrap();
        let nested = Criteria::and([leaf]).unwrap();

        let at_limit = EvaluationOptions::default().with_max_depth(2);
        assert!(check_depth(&nested, &at_limit).is_ok());

        let below = EvaluationOptions::default().with_max_depth(1);
        assert_eq!(
            check_depth(&nested, &below),
            Err(EvalError::RecursionLimit { depth: 2, max: 1 })
        );
    }
}
