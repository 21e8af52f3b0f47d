//! Replaying a correction against the automaton it was computed for.
//!
//! A correction names synthetic states by the class they realize, not by a
//! concrete id. Replay allocates fresh ids for them and resolves every
//! class reference; a reference made outside the bundle that introduced
//! the state may match several allocations, in which case each choice is
//! materialized. The result is therefore a non-empty list of automata.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::automaton::{Automaton, StateId};
use crate::edits::{EditBundle, EditOp};
use crate::error::CorrectionError;
use crate::state::StateRef;

/// Materializes `correction` over `to_correct`.
///
/// One automaton per way of resolving multi-valued class references; a
/// correction with none produces exactly one.
pub fn apply_correction(
    to_correct: &Automaton,
    correction: &[EditBundle],
) -> Result<Vec<Automaton>, CorrectionError> {
    debug!("applying a correction of {} bundles", correction.len());

    let mut next_state = to_correct.num_states();
    let mut synthetics: HashMap<StateRef, Vec<StateId>> = HashMap::new();
    let mut kept: BTreeSet<StateId> = BTreeSet::new();
    let mut initials: BTreeSet<StateId> = BTreeSet::new();
    let mut finals: BTreeSet<StateId> = to_correct.finals().clone();
    let mut options: Vec<(Vec<StateId>, char, Vec<StateId>)> = Vec::new();

    for bundle in correction {
        // A class mark may only name the state its own bundle introduced,
        // so the allocation pointer resets at every bundle.
        let mut step_new: Option<(StateRef, StateId)> = None;
        for op in bundle {
            match op {
                EditOp::AddNewState { state } => {
                    if state.is_original() {
                        return Err(CorrectionError::MalformedOperation {
                            op: "AddNewState",
                            state: *state,
                        });
                    }
                    let allocated = next_state;
                    next_state += 1;
                    synthetics.entry(*state).or_default().push(allocated);
                    kept.insert(allocated);
                    step_new = Some((*state, allocated));
                }
                EditOp::AddTransition { source, symbol, target } => {
                    let sources = resolve_source(*source, &synthetics)?;
                    let targets = resolve_target(*target, &synthetics, step_new)?;
                    options.push((sources, *symbol, targets));
                }
                EditOp::LeaveInitial { state } => {
                    let state = concrete("LeaveInitial", *state)?;
                    initials.insert(state);
                    kept.insert(state);
                }
                EditOp::LeaveTransition { source, symbol, target } => {
                    let source = concrete("LeaveTransition", *source)?;
                    let target = concrete("LeaveTransition", *target)?;
                    options.push((vec![source], *symbol, vec![target]));
                }
                EditOp::MarkAsInitial { state } => {
                    initials.insert(resolve_mark(*state, step_new)?);
                }
                EditOp::MarkStateAsFinal { state } => {
                    finals.insert(resolve_mark(*state, step_new)?);
                }
                EditOp::MarkStateAsNonFinal { state } => {
                    finals.remove(&resolve_mark(*state, step_new)?);
                }
                EditOp::RemoveMarkAsInitial { .. } | EditOp::RemoveTransition { .. } => {}
            }
        }
    }

    let assignments = unroll(&options);
    debug!("{} transition assignments", assignments.len());

    let mut results = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        // States neither kept nor touched by a transition fall away, and
        // their stale initial and final marks with them.
        let mut touched = kept.clone();
        for &(source, _, target) in &assignment {
            touched.insert(source);
            touched.insert(target);
        }
        let initials = initials.iter().copied().filter(|s| touched.contains(s));
        let finals = finals.iter().copied().filter(|s| touched.contains(s));
        results.push(Automaton::new(initials, assignment, finals));
    }
    Ok(results)
}

fn concrete(op: &'static str, state: StateRef) -> Result<StateId, CorrectionError> {
    match state {
        StateRef::Original(state) => Ok(state),
        synthetic => Err(CorrectionError::MalformedOperation { op, state: synthetic }),
    }
}

fn resolve_source(
    state: StateRef,
    synthetics: &HashMap<StateRef, Vec<StateId>>,
) -> Result<Vec<StateId>, CorrectionError> {
    match state {
        StateRef::Original(state) => Ok(vec![state]),
        synthetic => synthetics
            .get(&synthetic)
            .cloned()
            .ok_or(CorrectionError::UnknownClass(synthetic)),
    }
}

fn resolve_target(
    state: StateRef,
    synthetics: &HashMap<StateRef, Vec<StateId>>,
    step_new: Option<(StateRef, StateId)>,
) -> Result<Vec<StateId>, CorrectionError> {
    if let Some((identity, allocated)) = step_new {
        if identity == state {
            return Ok(vec![allocated]);
        }
    }
    resolve_source(state, synthetics)
}

fn resolve_mark(
    state: StateRef,
    step_new: Option<(StateRef, StateId)>,
) -> Result<StateId, CorrectionError> {
    match state {
        StateRef::Original(state) => Ok(state),
        synthetic => match step_new {
            Some((identity, allocated)) if identity == synthetic => Ok(allocated),
            _ => Err(CorrectionError::ForeignClassMark(synthetic)),
        },
    }
}

/// Expands multi-valued transition endpoints into every concrete choice.
/// No options yields the single empty assignment.
fn unroll(options: &[(Vec<StateId>, char, Vec<StateId>)]) -> Vec<Vec<(StateId, char, StateId)>> {
    let mut assignments = vec![Vec::new()];
    for (sources, symbol, targets) in options {
        let mut extended = Vec::with_capacity(assignments.len() * sources.len() * targets.len());
        for assignment in &assignments {
            for &source in sources {
                for &target in targets {
                    let mut next = assignment.clone();
                    next.push((source, *symbol, target));
                    extended.push(next);
                }
            }
        }
        assignments = extended;
    }
    assignments
}
