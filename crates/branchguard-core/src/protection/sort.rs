/// Intersects two ascending sequences.
///
/// Every element of `a` that is also present in `b` is kept, with the
/// multiplicity it has in `a`. The output stays ascending.
pub fn intersect_sorted<T: Ord>(a: Vec<T>, b: &[T]) -> Vec<T> {
    let mut output = Vec::with_capacity(a.len().min(b.len()));
    let mut idx_b = 0;

    for item in a {
        while idx_b < b.len() && b[idx_b] < item {
            idx_b += 1;
        }

        if idx_b == b.len() {
            break;
        }

        if b[idx_b] == item {
            output.push(item);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use branchguard_models::MergeMethod;
    use pretty_assertions::assert_eq;

    use super::intersect_sorted;

    #[test]
    fn intersect() {
        let cases: &[(&str, &[i32], &[i32], &[i32])] = &[
            ("empty", &[], &[], &[]),
            ("remove last", &[3, 4], &[2, 3], &[3]),
            ("remove first", &[3, 4, 6], &[4, 5, 6], &[4, 6]),
            ("remove all", &[3, 4], &[], &[]),
            ("leave all", &[3, 4], &[1, 2, 3, 4, 5, 6], &[3, 4]),
            ("remove first and last", &[3, 4, 4, 4, 5], &[4, 6], &[4, 4, 4]),
            ("remove duplicated", &[3, 4], &[3, 3, 3, 5, 5], &[3]),
        ];

        for (name, a, b, expected) in cases {
            assert_eq!(intersect_sorted(a.to_vec(), b), expected.to_vec(), "{name}");
        }
    }

    #[test]
    fn commutative_on_sets() {
        let a = [1, 3, 5, 7, 9];
        let b = [2, 3, 4, 5, 9, 10];

        assert_eq!(
            intersect_sorted(a.to_vec(), &b),
            intersect_sorted(b.to_vec(), &a)
        );
        assert_eq!(intersect_sorted(a.to_vec(), &a), a.to_vec());
    }

    #[test]
    fn merge_methods() {
        let all = MergeMethod::all();

        assert_eq!(
            intersect_sorted(all, &[MergeMethod::Rebase, MergeMethod::Squash]),
            vec![MergeMethod::Rebase, MergeMethod::Squash]
        );
        assert_eq!(
            intersect_sorted(vec![MergeMethod::Merge], &[MergeMethod::Rebase]),
            Vec::<MergeMethod>::new()
        );
    }
}
