use pathlab_core::experiment::HeuristicKind;
use pathlab_core::graph::Algorithm;

/// Parse algorithm name from string
pub fn parse_algorithm(s: &str) -> std::result::Result<Algorithm, String> {
    s.parse::<Algorithm>().map_err(|e| e.to_string())
}

/// Parse heuristic name from string
pub fn parse_heuristic(s: &str) -> std::result::Result<HeuristicKind, String> {
    s.parse::<HeuristicKind>().map_err(|e| e.to_string())
}

/// Parse a grid cell written as `x,y`
pub fn parse_cell(s: &str) -> std::result::Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in {s:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in {s:?}"))?;
    Ok((x, y))
}
