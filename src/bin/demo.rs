use splay_sequence::SplaySequence;

fn build(values: &[i64]) -> SplaySequence {
    let mut seq = SplaySequence::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        seq.insert(v, i);
    }
    seq
}

fn show(label: &str, seq: &mut SplaySequence) {
    println!("{label}: {:?}", seq.to_vec());
}

fn main() {
    let mut seq = build(&[1, 2, 3, 4, 5]);
    show("start", &mut seq);

    seq.add(2, 4, 10);
    show("after add(2, 4, 10)", &mut seq);

    seq.assign(2, 4, 9);
    show("after assign(2, 4, 9)", &mut seq);

    seq.reverse(1, 5);
    show("after reverse(1, 5)", &mut seq);

    println!("sum(1, 5) = {}", seq.sum(1, 5));
    println!("min() = {}", seq.min());

    let mut perm = build(&[1, 2, 3]);
    show("permutation start", &mut perm);
    for _ in 0..6 {
        perm.next_permutation(1, 3);
        show("next_permutation", &mut perm);
    }
}
