//! Single-element reorder: splice out at the active index, splice in at the
//! target's original index.
//!
//! Moving forward shifts the elements in between one step left; moving
//! backward shifts them one step right. Everything else keeps its relative
//! order.

/// Moves the element at `from` to index `to`.
///
/// Out-of-range indices leave the vector unchanged.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Returns `seq` with `active` moved to the position `over` occupied.
///
/// A no-op (returns a copy of `seq`) when `active == over` or either is
/// absent.
pub fn reorder<T: PartialEq + Clone>(seq: &[T], active: &T, over: &T) -> Vec<T> {
    let mut out = seq.to_vec();
    if active == over {
        return out;
    }
    if let Some((from, to)) = move_indices(seq, active, over) {
        array_move(&mut out, from, to);
    }
    out
}

/// Indices `(from, to)` for moving `active` onto `over`, if both are present
/// and distinct.
pub fn move_indices<T: PartialEq>(seq: &[T], active: &T, over: &T) -> Option<(usize, usize)> {
    if active == over {
        return None;
    }
    let from = seq.iter().position(|x| x == active)?;
    let to = seq.iter().position(|x| x == over)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_forward_move_shifts_left() {
        assert_eq!(reorder(&letters("abcde"), &'b', &'d'), letters("acdbe"));
    }

    #[test]
    fn test_backward_move_shifts_right() {
        assert_eq!(reorder(&letters("abcde"), &'e', &'b'), letters("aebcd"));
    }

    #[test]
    fn test_move_to_ends() {
        assert_eq!(reorder(&letters("abcde"), &'a', &'e'), letters("bcdea"));
        assert_eq!(reorder(&letters("abcde"), &'e', &'a'), letters("eabcd"));
    }

    #[test]
    fn test_adjacent_swap() {
        assert_eq!(reorder(&letters("abc"), &'a', &'b'), letters("bac"));
        assert_eq!(reorder(&letters("abc"), &'c', &'b'), letters("acb"));
    }

    #[test]
    fn test_identity_is_noop() {
        let seq = letters("abcde");
        for x in &seq {
            assert_eq!(reorder(&seq, x, x), seq);
        }
    }

    #[test]
    fn test_absent_ids_are_noop() {
        let seq = letters("abc");
        assert_eq!(reorder(&seq, &'z', &'a'), seq);
        assert_eq!(reorder(&seq, &'a', &'z'), seq);
        assert_eq!(reorder(&[], &'a', &'b'), Vec::<char>::new());
    }

    /// Every distinct pair: the result is a permutation, the active element
    /// lands where the target was, and the others keep their order.
    #[test]
    fn test_all_pairs_properties() {
        let seq = letters("abcdef");
        for a in &seq {
            for b in &seq {
                let out = reorder(&seq, a, b);

                let mut sorted_in = seq.clone();
                let mut sorted_out = out.clone();
                sorted_in.sort();
                sorted_out.sort();
                assert_eq!(sorted_in, sorted_out, "not a permutation for {a}->{b}");

                let target = seq.iter().position(|x| x == b).unwrap();
                assert_eq!(out[target], *a, "active not at target for {a}->{b}");

                let rest_in: Vec<_> = seq.iter().filter(|x| *x != a).collect();
                let rest_out: Vec<_> = out.iter().filter(|x| *x != a).collect();
                assert_eq!(rest_in, rest_out, "relative order broken for {a}->{b}");
            }
        }
    }

    #[test]
    fn test_array_move_out_of_range_is_noop() {
        let mut v = vec![1, 2, 3];
        array_move(&mut v, 0, 3);
        array_move(&mut v, 5, 0);
        assert_eq!(v, vec![1, 2, 3]);
    }
}
