use tally_election::{CallMessage, ElectionError};

use helpers::*;

mod helpers;

#[test]
fn replay_two_candidate_election() {
    let admin = generate_address("admin");
    let (election, storage) = setup(admin);

    for name in ["Tinubu", "Peter obi"] {
        execute(
            &election,
            &storage,
            admin,
            CallMessage::AddCandidate {
                name: name.to_owned(),
            },
        )
        .unwrap();
    }
    execute(&election, &storage, admin, CallMessage::StartVoting).unwrap();

    for (key, candidate_index) in [("voter_1", 0), ("voter_2", 1), ("voter_3", 0)] {
        execute(
            &election,
            &storage,
            generate_address(key),
            CallMessage::Vote { candidate_index },
        )
        .unwrap();
    }

    let err = execute(
        &election,
        &storage,
        generate_address("voter_1"),
        CallMessage::Vote { candidate_index: 1 },
    )
    .unwrap_err();
    assert_eq!(err, ElectionError::AlreadyVoted);
    assert_eq!(err.to_string(), "You have already voted.");

    execute(&election, &storage, admin, CallMessage::EndVoting).unwrap();

    let results = read(&storage, |ws| election.results(ws));
    assert_eq!(results.winner.as_deref(), Some("Tinubu"));
    assert_eq!(results.total_votes, 3);
    assert_eq!(
        results
            .candidates
            .iter()
            .map(|c| c.vote_count)
            .collect::<Vec<_>>(),
        vec![2, 1]
    );
}

#[test]
fn rejected_calls_leave_storage_untouched() {
    let admin = generate_address("admin");
    let voter = generate_address("voter");
    let (election, storage) = setup(admin);

    execute(
        &election,
        &storage,
        admin,
        CallMessage::AddCandidate {
            name: "Tinubu".to_owned(),
        },
    )
    .unwrap();

    let before = storage.snapshot();

    let rejected = [
        (voter, CallMessage::StartVoting, ElectionError::Unauthorized),
        (
            voter,
            CallMessage::AddCandidate {
                name: "Mallory".to_owned(),
            },
            ElectionError::Unauthorized,
        ),
        (
            voter,
            CallMessage::Vote { candidate_index: 0 },
            ElectionError::VotingClosed,
        ),
    ];
    for (sender, msg, expected) in rejected {
        assert_eq!(execute(&election, &storage, sender, msg), Err(expected));
    }
    assert_eq!(storage.snapshot(), before);

    execute(&election, &storage, admin, CallMessage::StartVoting).unwrap();
    let before = storage.snapshot();

    assert_eq!(
        execute(
            &election,
            &storage,
            voter,
            CallMessage::Vote { candidate_index: 7 }
        ),
        Err(ElectionError::InvalidCandidate {
            index: 7,
            candidate_count: 1
        })
    );
    assert_eq!(storage.snapshot(), before);
    assert!(!read(&storage, |ws| election.has_voted(&voter, ws)));
}

#[test]
fn queries_work_in_every_phase() {
    let admin = generate_address("admin");
    let (election, storage) = setup(admin);

    assert_eq!(read(&storage, |ws| election.admin(ws)), Some(admin));
    assert_eq!(
        read(&storage, |ws| election.winner_name(ws)),
        Err(ElectionError::NoCandidates)
    );
    assert_eq!(
        read(&storage, |ws| election.candidate(0, ws)),
        Err(ElectionError::InvalidCandidate {
            index: 0,
            candidate_count: 0
        })
    );

    execute(
        &election,
        &storage,
        admin,
        CallMessage::AddCandidate {
            name: "Solo".to_owned(),
        },
    )
    .unwrap();

    for msg in [CallMessage::StartVoting, CallMessage::EndVoting] {
        execute(&election, &storage, admin, msg).unwrap();
        assert_eq!(read(&storage, |ws| election.winner_name(ws)).unwrap(), "Solo");
        assert_eq!(read(&storage, |ws| election.candidate_count(ws)), 1);
    }
}
