use rand::{rngs::SmallRng, Rng, SeedableRng};

use firecore_duel::prelude::*;

fn pokemon(name: &str, types: PokemonTypes, level: Level, base: StatSet, moves: Vec<Move>) -> CombatantData {
    CombatantData {
        id: 0,
        name: name.to_owned(),
        types,
        level,
        base,
        moves: moves.into(),
    }
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let bulbasaur = pokemon(
        "bulbasaur",
        PokemonTypes::dual(PokemonType::Grass, PokemonType::Poison),
        20,
        StatSet::new(45, 49, 49, 65, 65, 45),
        vec![
            Move::new("vine-whip", PokemonType::Grass, MoveCategory::Physical, Some(45), Some(100)),
            Move::new("tackle", PokemonType::Normal, MoveCategory::Physical, Some(40), Some(100)),
            Move::new("growl", PokemonType::Normal, MoveCategory::Status, None, Some(100))
                .with_effect("Lowers the target's Attack by one stage.", None),
        ],
    );

    let charmander = pokemon(
        "charmander",
        PokemonTypes::single(PokemonType::Fire),
        20,
        StatSet::new(39, 52, 43, 60, 50, 65),
        vec![
            Move::new("ember", PokemonType::Fire, MoveCategory::Special, Some(40), Some(100))
                .with_effect("Has a $effect_chance% chance to burn the target.", Some(10)),
            Move::new("scratch", PokemonType::Normal, MoveCategory::Physical, Some(40), Some(100)),
        ],
    );

    let mut random = SmallRng::seed_from_u64(2024);

    let mut battle = Battle::new(BattleSettings::default(), bulbasaur, charmander).unwrap();

    #[cfg(feature = "mpsc_endpoint")]
    let client = {
        let (endpoint, client) = firecore_duel::endpoint::create();
        battle.subscribe(endpoint);
        client
    };

    battle.start(&mut random).unwrap();

    while !battle.finished() {
        let moves = battle.combatant(battle.turn()).moves.len();
        let index = random.gen_range(0..moves);
        if let Err(err) = battle.act(&mut random, index) {
            log::warn!("{}", err);
        }
    }

    for line in battle.log().lines() {
        println!("{}", line);
    }

    #[cfg(feature = "mpsc_endpoint")]
    log::info!("Endpoint received {} messages", client.drain().len());
}
