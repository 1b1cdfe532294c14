// lambdatron-core - Seq engine

//! Forcing and traversal for sequences.
//!
//! The value model stores lazy nodes; actually running their thunks needs
//! the evaluator, so forcing lives here. A node is forced at most once: the
//! thunk result is memoized into the node and the thunk dropped. Thunks
//! evaluate in their captured context, which chains back to the interpreter
//! root.

use lambdatron_reader::{Seq, SeqView, Value};

use crate::error::{EvalError, Result};
use crate::eval::apply::apply_closure;

/// Force the front of a sequence, returning its realised view.
///
/// The first force of a lazy node runs its thunk once and memoizes the
/// result: `nil` or an empty seq settle the node empty; a seq donates its
/// head and tail; any other value becomes a single-element seq.
pub fn force(seq: &Seq) -> Result<SeqView> {
    if let Some(view) = seq.view() {
        return Ok(view);
    }

    // The thunk may itself return an unforced lazy seq; chase the chain
    // iteratively and settle every node on it with the final view.
    let mut chain: Vec<Seq> = vec![seq.clone()];
    let mut current = seq.clone();
    let view = loop {
        let thunk = match current.pending_thunk() {
            Some(thunk) => thunk,
            // Settled while walking (the same node reached twice).
            None => match current.view() {
                Some(view) => break view,
                None => return Err(EvalError::runtime("lazy seq in invalid state")),
            },
        };
        let produced = apply_closure(&thunk, &[])?;
        match produced {
            Value::Nil => break SeqView::Empty,
            Value::Seq(inner) => match inner.view() {
                Some(view) => break view,
                None => {
                    chain.push(inner.clone());
                    current = inner;
                }
            },
            other => break SeqView::Cons(other, Seq::empty()),
        }
    };

    for node in &chain {
        node.settle(view.clone());
    }
    Ok(view)
}

/// Iterator over a sequence, forcing nodes on demand. Evaluation errors
/// during forcing surface as `Err` items; iteration stops after an error.
pub struct SeqIterator {
    current: Seq,
    done: bool,
}

impl SeqIterator {
    pub fn new(seq: Seq) -> Self {
        SeqIterator {
            current: seq,
            done: false,
        }
    }
}

impl Iterator for SeqIterator {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match force(&self.current) {
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            Ok(SeqView::Empty) => {
                self.done = true;
                None
            }
            Ok(SeqView::Cons(head, tail)) => {
                self.current = tail;
                Some(Ok(head))
            }
        }
    }
}

/// View a value as a sequence without forcing anything: `nil` and seqs map
/// directly, vectors and strings enumerate their elements, maps enumerate
/// `[k v]` pairs. Returns `None` for values with no sequence reading.
#[must_use]
pub fn seq_of(value: &Value) -> Option<Seq> {
    match value {
        Value::Nil => Some(Seq::empty()),
        Value::Seq(seq) => Some(seq.clone()),
        Value::Vector(items) => Some(Seq::from_vec(items.iter().cloned().collect())),
        Value::Map(map) => Some(Seq::from_vec(
            map.iter()
                .map(|(k, v)| Value::vector(vec![k.clone(), v.clone()]))
                .collect(),
        )),
        Value::Str(s) => Some(Seq::from_vec(s.chars().map(Value::char).collect())),
        _ => None,
    }
}

/// Fully realise a sequence into a vector. Infinite sequences will not
/// return; bound them with `take` first.
pub fn to_vec(seq: &Seq) -> Result<Vec<Value>> {
    SeqIterator::new(seq.clone()).collect()
}

/// Force every sequence reachable from a value. Forcing memoizes in place,
/// so the value itself can be used afterwards; structural equality and
/// printing then see the realised elements. Does not terminate on infinite
/// sequences.
pub fn realize_deep(value: &Value) -> Result<()> {
    match value {
        Value::Seq(seq) => {
            for element in SeqIterator::new(seq.clone()) {
                realize_deep(&element?)?;
            }
            Ok(())
        }
        Value::Vector(items) => {
            for item in items.iter() {
                realize_deep(item)?;
            }
            Ok(())
        }
        Value::Map(map) => {
            for (k, v) in map.iter() {
                realize_deep(k)?;
                realize_deep(v)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_cons_chain() {
        let seq = Seq::from_vec(vec![Value::int(1), Value::int(2)]);
        match force(&seq).unwrap() {
            SeqView::Cons(head, tail) => {
                assert_eq!(head, Value::int(1));
                assert_eq!(to_vec(&tail).unwrap(), vec![Value::int(2)]);
            }
            SeqView::Empty => panic!("expected cons"),
        }
    }

    #[test]
    fn test_iterator_over_plain_seq() {
        let seq = Seq::from_vec(vec![Value::int(1), Value::int(2), Value::int(3)]);
        let collected: Result<Vec<_>> = SeqIterator::new(seq).collect();
        assert_eq!(
            collected.unwrap(),
            vec![Value::int(1), Value::int(2), Value::int(3)]
        );
    }

    #[test]
    fn test_seq_of_conversions() {
        assert!(seq_of(&Value::Nil).unwrap().is_known_empty());
        let v = Value::vector(vec![Value::int(1)]);
        let seq = seq_of(&v).unwrap();
        assert!(matches!(seq.view(), Some(SeqView::Cons(_, _))));
        let s = Value::string("ab");
        assert_eq!(
            to_vec(&seq_of(&s).unwrap()).unwrap(),
            vec![Value::char('a'), Value::char('b')]
        );
        assert!(seq_of(&Value::int(1)).is_none());
    }
}
