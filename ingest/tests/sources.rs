use ingest::{Batch, Entity, SourceError};
use pretty_assertions::assert_eq;

fn valid_dir() -> std::path::PathBuf {
    std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/valid")).to_path_buf()
}

#[test]
fn teams() {
    let result = ingest::read_batch(Entity::Team, &valid_dir()).unwrap();

    let expected = Batch::Teams(vec![
        ingest::TeamRow {
            team_id: 101,
            team_name: "Sentinels".to_owned(),
        },
        ingest::TeamRow {
            team_id: 102,
            team_name: "Fnatic".to_owned(),
        },
    ]);

    assert_eq!(expected, result);
}

#[test]
fn agents_with_roles() {
    let result = ingest::read_batch(Entity::Agent, &valid_dir()).unwrap();

    let roles: Vec<_> = match result {
        Batch::Agents(agents) => agents.into_iter().map(|a| (a.agent_name, a.role)).collect(),
        other => panic!("Expected agents, got {:?}", other.entity()),
    };

    assert_eq!(
        vec![
            ("Jett".to_owned(), Some(common::Role::Duelist)),
            ("Sova".to_owned(), Some(common::Role::Initiator)),
            ("Omen".to_owned(), Some(common::Role::Controller)),
            ("Killjoy".to_owned(), Some(common::Role::Sentinel)),
            ("Raze".to_owned(), None),
        ],
        roles
    );
}

#[test]
fn games_without_result() {
    let result = ingest::read_batch(Entity::Game, &valid_dir()).unwrap();

    let expected = Batch::Games(vec![
        ingest::GameRow {
            game_id: 1,
            team1_id: 101,
            team2_id: 102,
            map: Some("Ascent".to_owned()),
            winner_id: Some(102),
            w_score: Some(13),
            l_score: Some(9),
        },
        ingest::GameRow {
            game_id: 2,
            team1_id: 101,
            team2_id: 102,
            map: Some("Bind".to_owned()),
            winner_id: None,
            w_score: None,
            l_score: None,
        },
    ]);

    assert_eq!(expected, result);
}

#[test]
fn every_entity_matches_its_row_count() {
    let dir = valid_dir();

    let counts: Vec<_> = Entity::LOAD_ORDER
        .into_iter()
        .map(|e| (e, ingest::read_batch(e, &dir).unwrap().len()))
        .collect();

    assert_eq!(
        vec![
            (Entity::Team, 2),
            (Entity::Agent, 5),
            (Entity::Player, 10),
            (Entity::Game, 2),
            (Entity::Stat, 10),
        ],
        counts
    );
}

#[test]
fn missing_file() {
    let dir = std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../testfiles/does-not-exist"
    ));

    let result = ingest::read_batch(Entity::Team, dir);

    match result {
        Err(SourceError::NotFound { path }) => {
            assert!(path.ends_with("teams.csv"), "{:?}", path);
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn unknown_role() {
    let input = "agent_id,agent_name,role\n1,Jett,Duelist\n2,Clove,Support\n";

    let result = ingest::read_batch_from(Entity::Agent, input.as_bytes(), "agents.csv");

    match result {
        Err(SourceError::Malformed { line, field, value, .. }) => {
            assert_eq!(3, line);
            assert_eq!("role", field);
            assert_eq!("Support", value);
        }
        other => panic!("Expected Malformed, got {:?}", other),
    }
}

#[test]
fn non_numeric_id() {
    let input = "team_id,team_name\nabc,Sentinels\n";

    let result = ingest::read_batch_from(Entity::Team, input.as_bytes(), "teams.csv");

    assert!(matches!(result, Err(SourceError::Csv { .. })), "{:?}", result);
}

#[test]
fn empty_source_has_no_rows() {
    let input = "team_id,team_name\n";

    let result = ingest::read_batch_from(Entity::Team, input.as_bytes(), "teams.csv").unwrap();

    assert!(result.is_empty());
}
