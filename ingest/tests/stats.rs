use ingest::{Batch, Entity, SourceError};
use pretty_assertions::assert_eq;

fn stats(input: &str) -> Result<Vec<ingest::StatRow>, SourceError> {
    match ingest::read_batch_from(Entity::Stat, input.as_bytes(), "stats.csv")? {
        Batch::Stats(rows) => Ok(rows),
        other => panic!("Expected stats, got {:?}", other.entity()),
    }
}

#[test]
fn export_headers_and_percentages() {
    let input = "\
player_id_x,player_name,player_id_y,game_id,agent_id,rating,acs,kill,death,assist,kast%,adr,hs%,fk,fd
7,Derke,1007,1,1,1.31,276,22,13,3,73%,170,41%,5,2
";

    let result = stats(input).unwrap();

    let expected = vec![ingest::StatRow {
        player_id: 1007,
        game_id: 1,
        agent_id: 1,
        rating: 1.31,
        acs: 276,
        kills: 22,
        deaths: 13,
        assists: 3,
        kast_percent: 73,
        adr: 170,
        hs_percent: 41,
        first_kills: 5,
        first_deaths: 2,
    }];

    assert_eq!(expected, result);
}

#[test]
fn canonical_headers_pass_through() {
    let input = "\
first_deaths,first_kills,hs_percent,adr,kast_percent,assists,deaths,kills,acs,rating,agent_id,game_id,player_id
2,5,41,170,73,3,13,22,276,1.31,1,1,1007
";

    let result = stats(input).unwrap();

    assert_eq!(1, result.len());
    assert_eq!(1007, result[0].player_id);
    assert_eq!(73, result[0].kast_percent);
    assert_eq!(41, result[0].hs_percent);
    assert_eq!(2, result[0].first_deaths);
}

#[test]
fn non_numeric_percent() {
    let dir = std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../testfiles/malformed_stats"
    ));

    let result = ingest::read_batch(Entity::Stat, dir);

    match result {
        Err(SourceError::Malformed {
            file,
            line,
            field,
            value,
            ..
        }) => {
            assert_eq!("stats.csv", file);
            assert_eq!(3, line);
            assert_eq!("kast_percent", field);
            assert_eq!("abc%", value);
        }
        other => panic!("Expected Malformed, got {:?}", other),
    }
}

#[test]
fn fixture_percentages() {
    let dir = std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/valid"));

    let rows = match ingest::read_batch(Entity::Stat, dir).unwrap() {
        Batch::Stats(rows) => rows,
        other => panic!("Expected stats, got {:?}", other.entity()),
    };

    let kast: Vec<_> = rows.iter().map(|r| r.kast_percent).collect();
    assert_eq!(vec![73, 70, 77, 68, 64, 82, 79, 84, 80, 86], kast);
    assert!(rows.iter().all(|r| (0..=100).contains(&r.hs_percent)));
}
