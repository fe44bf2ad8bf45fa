use super::Square;

pub fn sq(algebraic: &str) -> Square {
    algebraic.parse().unwrap()
}

pub fn assert_squares<I: IntoIterator<Item = Square>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.into_iter().map(|s| s.to_string()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}
