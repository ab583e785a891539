use std::collections::HashSet;

use proptest::prelude::*;
use tally_election::{CallMessage, ElectionError};
use tally_modules_api::Address;

use helpers::*;

mod helpers;

const VOTERS: u8 = 6;

#[derive(Debug, Clone)]
enum Op {
    AddCandidate(u8),
    StartVoting,
    EndVoting,
    Vote { voter: u8, candidate_index: u64 },
    IntruderCall(CallMessage),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::AddCandidate),
        Just(Op::StartVoting),
        Just(Op::EndVoting),
        (0..VOTERS, 0u64..6).prop_map(|(voter, candidate_index)| Op::Vote {
            voter,
            candidate_index
        }),
        prop_oneof![
            Just(CallMessage::StartVoting),
            Just(CallMessage::EndVoting),
            Just(CallMessage::AddCandidate {
                name: "intruder".to_owned()
            }),
        ]
        .prop_map(Op::IntruderCall),
    ]
}

fn voter(index: u8) -> Address {
    generate_address(&format!("voter_{index}"))
}

proptest! {
    #[test]
    fn tallies_always_match_voters(ops in proptest::collection::vec(op(), 0..40)) {
        let admin = generate_address("admin");
        let intruder = generate_address("intruder");
        let (election, storage) = setup(admin);

        let mut names: Vec<String> = Vec::new();
        let mut voted: HashSet<u8> = HashSet::new();
        let mut open = false;

        for op in ops {
            let before = storage.snapshot();
            let result = match op {
                Op::AddCandidate(n) => {
                    let name = format!("candidate_{n}");
                    names.push(name.clone());
                    execute(&election, &storage, admin, CallMessage::AddCandidate { name })
                }
                Op::StartVoting => {
                    open = true;
                    execute(&election, &storage, admin, CallMessage::StartVoting)
                }
                Op::EndVoting => {
                    open = false;
                    execute(&election, &storage, admin, CallMessage::EndVoting)
                }
                Op::Vote { voter: v, candidate_index } => {
                    let expected = if !open {
                        Err(ElectionError::VotingClosed)
                    } else if voted.contains(&v) {
                        Err(ElectionError::AlreadyVoted)
                    } else if candidate_index >= names.len() as u64 {
                        Err(ElectionError::InvalidCandidate {
                            index: candidate_index,
                            candidate_count: names.len() as u64,
                        })
                    } else {
                        voted.insert(v);
                        Ok(())
                    };
                    let result = execute(
                        &election,
                        &storage,
                        voter(v),
                        CallMessage::Vote { candidate_index },
                    );
                    prop_assert_eq!(&result, &expected);
                    result
                }
                Op::IntruderCall(msg) => {
                    let result = execute(&election, &storage, intruder, msg);
                    prop_assert_eq!(&result, &Err(ElectionError::Unauthorized));
                    result
                }
            };

            if result.is_err() {
                prop_assert_eq!(storage.snapshot(), before);
            }

            let tally: u64 = read(&storage, |ws| election.candidates(ws))
                .iter()
                .map(|c| c.vote_count)
                .sum();
            prop_assert_eq!(tally, voted.len() as u64);
            prop_assert_eq!(read(&storage, |ws| election.total_votes(ws)), tally);
        }

        let candidates = read(&storage, |ws| election.candidates(ws));
        prop_assert_eq!(
            candidates.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
            names
        );
        prop_assert_eq!(read(&storage, |ws| election.voting_open(ws)), open);
        for v in 0..VOTERS {
            let has_voted = read(&storage, |ws| election.has_voted(&voter(v), ws));
            prop_assert_eq!(has_voted, voted.contains(&v));
        }

        let winner = read(&storage, |ws| election.winner(ws));
        match candidates.iter().map(|c| c.vote_count).max() {
            None => prop_assert_eq!(winner, Err(ElectionError::NoCandidates)),
            Some(max) => {
                let first = candidates.iter().position(|c| c.vote_count == max).unwrap();
                let (index, _) = winner.unwrap();
                prop_assert_eq!(index, first as u64);
            }
        }
    }
}
