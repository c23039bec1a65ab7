//! Route finder
//!
//! Pools form an undirected graph on token identities. Edges model pool
//! *existence*, not current tradability: reserves are checked per hop when a
//! path is simulated (see [`crate::swap_plan`]). Search is breadth-first, so
//! the result has the fewest hops, not the best price.
//!
//! Tie-break: neighbors are visited in the order their pools first appear in
//! the input list, so equal-length paths resolve to the one reachable through
//! earlier pools.

use crate::pool_traits::PoolPair;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use types::{PoolSnapshot, TokenId, TokenInfo};

/// Ordered token sequence from source to destination, at least two long
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TokenId>", into = "Vec<TokenId>")]
pub struct Path(Vec<TokenId>);

impl Path {
    pub fn tokens(&self) -> &[TokenId] {
        &self.0
    }

    /// Number of pools crossed
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Single pool between source and destination
    pub fn is_direct(&self) -> bool {
        self.0.len() == 2
    }

    pub fn source(&self) -> &TokenId {
        &self.0[0]
    }

    pub fn destination(&self) -> &TokenId {
        &self.0[self.0.len() - 1]
    }

    /// Consecutive `(token_in, token_out)` pairs
    pub fn legs(&self) -> impl Iterator<Item = (&TokenId, &TokenId)> {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl TryFrom<Vec<TokenId>> for Path {
    type Error = crate::AmmError;

    fn try_from(tokens: Vec<TokenId>) -> crate::error::Result<Self> {
        if tokens.len() < 2 {
            return Err(crate::AmmError::InvalidPath { len: tokens.len() });
        }
        Ok(Self(tokens))
    }
}

impl From<Path> for Vec<TokenId> {
    fn from(path: Path) -> Self {
        path.0
    }
}

/// Adjacency view of a pool list
#[derive(Debug, Clone, Default)]
pub struct PoolGraph {
    adjacency: HashMap<TokenId, Vec<TokenId>>,
}

impl PoolGraph {
    pub fn from_pools<'a, P, I>(pools: I) -> Self
    where
        P: PoolPair + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let mut graph = Self::default();
        for pool in pools {
            graph.connect(pool.token0(), pool.token1());
        }
        graph
    }

    fn connect(&mut self, a: &TokenId, b: &TokenId) {
        if a == b {
            return;
        }
        for (from, to) in [(a, b), (b, a)] {
            let neighbors = self.adjacency.entry(from.clone()).or_default();
            if !neighbors.contains(to) {
                neighbors.push(to.clone());
            }
        }
    }

    pub fn neighbors(&self, token: &TokenId) -> &[TokenId] {
        self.adjacency.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Minimum-hop path between two distinct tokens
    pub fn shortest_path(&self, from: &TokenId, to: &TokenId) -> Option<Path> {
        if from == to {
            return None;
        }

        let mut previous: HashMap<&TokenId, &TokenId> = HashMap::new();
        let mut visited: HashSet<&TokenId> = HashSet::from([from]);
        let mut queue: VecDeque<&TokenId> = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return Some(Self::unwind(&previous, from, to));
            }
            for neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    previous.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    fn unwind<'a>(previous: &HashMap<&'a TokenId, &'a TokenId>, from: &TokenId, to: &'a TokenId) -> Path {
        let mut tokens = vec![to.clone()];
        let mut cursor = to;
        while cursor != from {
            match previous.get(cursor) {
                Some(&prev) => {
                    tokens.push(prev.clone());
                    cursor = prev;
                }
                None => break,
            }
        }
        tokens.reverse();
        Path(tokens)
    }
}

/// Fewest-hop path from `token_in` to `token_out` across `pools`
///
/// `None` for a missing endpoint, a self-swap, or disconnected tokens.
pub fn best_path<P: PoolPair>(
    pools: &[P],
    token_in: Option<&TokenId>,
    token_out: Option<&TokenId>,
) -> Option<Path> {
    let (token_in, token_out) = (token_in?, token_out?);
    if token_in == token_out {
        return None;
    }
    PoolGraph::from_pools(pools).shortest_path(token_in, token_out)
}

/// Tokens directly tradable against `token`: counterparties in pools with
/// liquidity on both sides, first-seen order, no duplicates
pub fn tradable_counterparties(pools: &[PoolSnapshot], token: &TokenId) -> Vec<TokenInfo> {
    let mut seen = HashSet::new();
    pools
        .iter()
        .filter(|pool| pool.has_liquidity())
        .filter_map(|pool| {
            let other = pool.counterparty(token)?;
            seen.insert(other.clone()).then(|| pool.token_info(other)).flatten()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::PoolSide;

    fn t(s: &str) -> TokenId {
        s.parse().unwrap()
    }

    fn pair(a: &str, b: &str) -> (TokenId, TokenId) {
        (t(a), t(b))
    }

    fn tokens(path: &Path) -> Vec<&str> {
        path.tokens().iter().map(TokenId::as_str).collect()
    }

    #[test]
    fn test_two_hop_path() {
        let pools = vec![pair("x", "y"), pair("y", "z")];
        let path = best_path(&pools, Some(&t("x")), Some(&t("z"))).unwrap();
        assert_eq!(tokens(&path), ["x", "y", "z"]);
        assert_eq!(path.hops(), 2);
        assert!(!path.is_direct());
    }

    #[test]
    fn test_direct_pool_preferred() {
        let pools = vec![pair("x", "y"), pair("y", "z"), pair("x", "z")];
        let path = best_path(&pools, Some(&t("x")), Some(&t("z"))).unwrap();
        assert_eq!(tokens(&path), ["x", "z"]);
        assert!(path.is_direct());
    }

    #[test]
    fn test_no_path_cases() {
        let pools = vec![pair("x", "y"), pair("y", "z"), pair("p", "q")];
        assert_eq!(best_path(&pools, Some(&t("x")), Some(&t("x"))), None);
        assert_eq!(best_path(&pools, Some(&t("X")), Some(&t("x"))), None);
        assert_eq!(best_path(&pools, Some(&t("x")), Some(&t("q"))), None);
        assert_eq!(best_path(&pools, None, Some(&t("z"))), None);
        assert_eq!(best_path::<(TokenId, TokenId)>(&[], Some(&t("x")), Some(&t("z"))), None);
    }

    #[test]
    fn test_case_insensitive_endpoints() {
        let pools = vec![pair("0xAA", "0xbb"), pair("0xBB", "0xcc")];
        let path = best_path(&pools, Some(&t("0xaa")), Some(&t("0xCC"))).unwrap();
        assert_eq!(tokens(&path), ["0xaa", "0xbb", "0xcc"]);
    }

    #[test]
    fn test_tie_break_follows_pool_order() {
        let pools = vec![pair("a", "m1"), pair("a", "m2"), pair("m2", "d"), pair("m1", "d")];
        let path = best_path(&pools, Some(&t("a")), Some(&t("d"))).unwrap();
        assert_eq!(tokens(&path), ["a", "m1", "d"]);
    }

    #[test]
    fn test_longer_chain_and_cycles() {
        let pools = vec![pair("a", "b"), pair("b", "a"), pair("b", "c"), pair("c", "a"), pair("c", "d"), pair("d", "e")];
        let path = best_path(&pools, Some(&t("a")), Some(&t("e"))).unwrap();
        assert_eq!(tokens(&path), ["a", "c", "d", "e"]);
    }

    #[test]
    fn test_edges_ignore_reserves() {
        let pools = vec![
            PoolSnapshot::new(PoolSide::new(t("x"), 0u32), PoolSide::new(t("y"), 0u32)).unwrap(),
        ];
        assert!(best_path(&pools, Some(&t("x")), Some(&t("y"))).is_some());
    }

    #[test]
    fn test_path_rejects_single_token() {
        assert!(Path::try_from(vec![t("x")]).is_err());
        let path = Path::try_from(vec![t("x"), t("y")]).unwrap();
        assert_eq!(path.source(), &t("x"));
        assert_eq!(path.destination(), &t("y"));
    }

    #[test]
    fn test_path_serde_enforces_length() {
        assert!(serde_json::from_str::<Path>("[]").is_err());
        assert!(serde_json::from_str::<Path>(r#"["0xaa"]"#).is_err());

        let path: Path = serde_json::from_str(r#"["0xAA", "0xbb", "0xcc"]"#).unwrap();
        assert_eq!(path.source(), &t("0xaa"));
        assert_eq!(path.hops(), 2);
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["0xaa","0xbb","0xcc"]"#);
    }

    #[test]
    fn test_tradable_counterparties() {
        let pools = vec![
            PoolSnapshot::new(
                PoolSide::new(t("0xaa"), 10u32).with_symbol("AAA"),
                PoolSide::new(t("0xbb"), 10u32).with_symbol("BBB").with_decimals(6),
            )
            .unwrap(),
            PoolSnapshot::new(PoolSide::new(t("0xaa"), 10u32), PoolSide::new(t("0xcc"), 0u32)).unwrap(),
            PoolSnapshot::new(PoolSide::new(t("0xbb"), 5u32), PoolSide::new(t("0xaa"), 5u32)).unwrap(),
            PoolSnapshot::new(PoolSide::new(t("0xdd"), 5u32), PoolSide::new(t("0xee"), 5u32)).unwrap(),
        ];

        let tokens = tradable_counterparties(&pools, &t("0xAA"));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].address, t("0xbb"));
        assert_eq!(tokens[0].symbol, "BBB");
        assert_eq!(tokens[0].decimals, 6);
    }
}
