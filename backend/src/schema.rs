// Mirrors the tables created in `crate::tables`.

diesel::table! {
    teams (team_id) {
        team_id -> Int4,
        #[max_length = 255]
        team_name -> Varchar,
    }
}

diesel::table! {
    agents (agent_id) {
        agent_id -> Int4,
        #[max_length = 255]
        agent_name -> Varchar,
        #[max_length = 255]
        role -> Nullable<Varchar>,
    }
}

diesel::table! {
    players (player_id) {
        player_id -> Int4,
        #[max_length = 255]
        player_name -> Varchar,
        team_id -> Nullable<Int4>,
    }
}

diesel::table! {
    games (game_id) {
        game_id -> Int4,
        team1_id -> Int4,
        team2_id -> Int4,
        #[max_length = 255]
        map -> Nullable<Varchar>,
        winner_id -> Nullable<Int4>,
        w_score -> Nullable<Int4>,
        l_score -> Nullable<Int4>,
    }
}

diesel::table! {
    stats (game_id, player_id) {
        player_id -> Int4,
        game_id -> Int4,
        agent_id -> Int4,
        rating -> Float4,
        acs -> Int4,
        kills -> Int4,
        deaths -> Int4,
        assists -> Int4,
        kast_percent -> Int4,
        adr -> Int4,
        hs_percent -> Int4,
        first_kills -> Int4,
        first_deaths -> Int4,
    }
}

diesel::joinable!(players -> teams (team_id));
diesel::joinable!(stats -> agents (agent_id));
diesel::joinable!(stats -> games (game_id));
diesel::joinable!(stats -> players (player_id));

diesel::allow_tables_to_appear_in_same_query!(
    agents,
    games,
    players,
    stats,
    teams,
);
