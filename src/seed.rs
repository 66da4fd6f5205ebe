use std::sync::Arc;

use crate::error::StoreError;
use crate::role::Role;
use crate::standings::types::{CriterionScore, Demerit, EventScore, Merit, Scorecard, TeamDetails, TeamRecord};
use crate::store::series::{
    BasePoints, DemeritDeduction, HouseRuleSection, LeaderRole, MeritPoints, PlacementPoints, ScoringRules,
    TeamColor, TeamFormation, TeamNaming,
};
use crate::store::{
    Criterion, EventDefinition, EventFields, EventSeriesStore, GuidelineSection, RulesDocument, Series, SeriesData,
    StatCard, User,
};

pub const MAIN_SERIES: &str = "i3 Day | Clash of Cards";
pub const SERIES_NAMES: [&str; 3] = [MAIN_SERIES, "Campus Clash", "Intramurals"];

/// The mock profile shown for each role
pub fn mock_user(role: Role) -> User {
    let (id, name, email, avatar) = match role {
        Role::User => (1, "Alex Johnson", "alex.j@sims.demo", "user1"),
        Role::Officer => (2, "Brenda Smith", "brenda.s@sims.demo", "user2"),
        Role::Admin => (3, "Chris Lee", "chris.l@sims.demo", "user3"),
    };
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: format!("https://i.pravatar.cc/150?u={}", avatar),
    }
}

pub fn mock_users() -> Vec<User> {
    Role::ALL.iter().map(|&role| mock_user(role)).collect()
}

/// Fresh dashboard state with the given series selected
pub fn initial_store(selected: &str) -> Result<EventSeriesStore, StoreError> {
    let series: Vec<Series> = SERIES_NAMES
        .iter()
        .map(|&name| Series {
            name: name.to_string(),
            data: Arc::new(if name == MAIN_SERIES { main_series() } else { SeriesData::default() }),
        })
        .collect();

    EventSeriesStore::new(series, selected)
}

fn main_series() -> SeriesData {
    SeriesData {
        stat_cards: Arc::new(vec![
            stat_card("Midnight Spades", "2850", 43.5, "bg-blue-500"),
            stat_card("Scarlet Hearts", "2400", 22.1, "bg-red-500"),
            stat_card("Emerald Clover", "1980", -5.8, "bg-green-500"),
            stat_card("Glacier Diamonds", "1850", 10.3, "bg-sky-500"),
        ]),
        leaderboard: Arc::new(leaderboard()),
        events: Arc::new(events().into_iter().map(Arc::new).collect()),
        top_players: Arc::new(mock_users()),
        rules: Some(Arc::new(rules())),
    }
}

fn stat_card(team: &str, points: &str, change: f64, color: &str) -> StatCard {
    StatCard {
        team: team.to_string(),
        points: points.to_string(),
        games: 14,
        change,
        color: color.to_string(),
    }
}

fn team(rank: u32, name: &str, score: i64, previous: [i64; 2], record: (u32, u32, u32), details: TeamDetails) -> TeamRecord {
    let (wins, losses, players) = record;
    TeamRecord {
        previous_scores: previous.to_vec(),
        wins,
        losses,
        players,
        details,
        ..TeamRecord::new(rank, name, score)
    }
}

fn merit(category: &str, points: i64, description: &str) -> Merit {
    Merit {
        category: category.to_string(),
        points,
        description: description.to_string(),
        updated_by: "Brenda Smith".to_string(),
    }
}

fn event_score(event_name: &str, placement: u32, base_points: i64, competition_points: i64, scorecard: Vec<Scorecard>) -> EventScore {
    EventScore {
        event_name: event_name.to_string(),
        placement,
        base_points,
        competition_points,
        scorecard,
    }
}

fn scorecard(judge: &str, scores: &[(&str, i64)]) -> Scorecard {
    Scorecard {
        judge: judge.to_string(),
        scores: scores
            .iter()
            .map(|(criteria, score)| CriterionScore { criteria: criteria.to_string(), score: *score })
            .collect(),
    }
}

fn leaderboard() -> Vec<TeamRecord> {
    let mut spades = team(
        1,
        "Midnight Spades",
        2850,
        [2800, 2750],
        (12, 2, 15),
        TeamDetails {
            merits: vec![
                merit("Attendance", 500, "Highest attendance"),
                merit("Sportsmanship", 50, "Fair play in Basketball"),
            ],
            demerits: vec![Demerit {
                reason: "Late for event".to_string(),
                points: 20,
                person: "John Doe".to_string(),
                updated_by: "Chris Lee".to_string(),
            }],
            event_scores: vec![
                event_score("Basketball", 1, 1500, 1500, vec![scorecard("Mr. Davison", &[("Offense", 90), ("Defense", 85)])]),
                event_score("Chess", 2, 1000, 800, vec![scorecard("Ms. Carol", &[("Strategy", 92), ("Speed", 78)])]),
            ],
        },
    );
    spades.live = true;

    vec![
        spades,
        team(
            2,
            "Scarlet Hearts",
            2400,
            [2420, 2350],
            (10, 4, 14),
            TeamDetails {
                merits: vec![merit("Discipline", 50, "Excellent cooperation")],
                demerits: Vec::new(),
                event_scores: vec![
                    event_score("Volleyball", 1, 1500, 1500, Vec::new()),
                    event_score("Debate", 3, 1200, 768, Vec::new()),
                ],
            },
        ),
        team(3, "Emerald Clover", 1980, [1950, 2000], (9, 5, 15), TeamDetails::default()),
        team(4, "Glacier Diamonds", 1850, [1800, 1820], (8, 6, 13), TeamDetails::default()),
    ]
}

fn criterion(name: &str, description: &str, points: f64) -> Criterion {
    Criterion {
        name: name.to_string(),
        description: description.to_string(),
        points,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn wave(title: &str, description: &str, guidelines: &[&str], criteria: Vec<Criterion>) -> Arc<GuidelineSection> {
    Arc::new(GuidelineSection {
        title: title.to_string(),
        description: Some(description.to_string()),
        guidelines: Some(strings(guidelines)),
        criteria: Some(Arc::new(criteria)),
        competition_points: Some(1000.0),
    })
}

/// Event without judges or rubric
fn listing(id: u64, category: &str, name: &str, officer: &str, participants: &str) -> EventDefinition {
    EventDefinition::new(
        id,
        EventFields {
            category: category.to_string(),
            name: name.to_string(),
            officer: officer.to_string(),
            participants: participants.to_string(),
            ..Default::default()
        },
    )
}

fn events() -> Vec<EventDefinition> {
    let joker_flag = EventDefinition::new(
        1,
        EventFields {
            category: "Joker Flag".to_string(),
            name: "Joker Flag (Chant, Silent Drill, Yell)".to_string(),
            officer: "Bhenny & Foncee".to_string(),
            participants: "ALL".to_string(),
            judges: Arc::new(strings(&["Judge A", "Judge B"])),
            description: Some(
                "The Joker Flag serves as the ultimate symbol of team spirit, unity, and dominance throughout the \
                 competition. Each team showcases its pride and creativity through three waves of performance: \
                 Chant, Silent Drill, and Yell. Each wave must last for a minimum of 1 minute."
                    .to_string(),
            ),
            details: Arc::new(vec![
                wave(
                    "WAVE 1 - CHANT",
                    "A rhythmic and melodic team chant that promotes the team's identity and energy.",
                    &[
                        "Duration: Minimum of 1 minute",
                        "Focus on rhythm, clarity, and team synergy",
                        "Lyrics must reflect the team's values, name, or spirit",
                        "Must be appropriate and respectful in content",
                    ],
                    vec![
                        criterion("Creativity & Originality", "Uniqueness and innovative approach in chant composition and presentation", 30.0),
                        criterion("Synchronization & Coordination", "Timing, teamwork, and alignment of movement and rhythm", 30.0),
                        criterion("Energy & Delivery", "Enthusiasm, projection, and liveliness of performance", 20.0),
                        criterion("Clarity & Team Identity", "Clear diction, message, and reflection of the team's character", 20.0),
                    ],
                ),
                wave(
                    "WAVE 2 - SILENT DRILL",
                    "A performance showcasing precision, discipline, and creativity using body percussion, movement, and improvised rhythms.",
                    &[
                        "Duration: Minimum of 1 minute",
                        "Must use body, claps, stomps, or objects (no musical instruments)",
                        "Vocal sounds allowed but minimal",
                        "Emphasis on timing, formation, and group coordination",
                    ],
                    vec![
                        criterion("Precision & Timing", "Accuracy and uniformity in movements and beats", 30.0),
                        criterion("Creativity & Use of Body Percussion", "Innovation in creating sound and rhythm using the body or improvised means", 30.0),
                        criterion("Synchronization & Formation", "Cohesiveness of the group and formation transitions", 20.0),
                        criterion("Overall Impact & Discipline", "General impression, composure, and performance quality", 20.0),
                    ],
                ),
                wave(
                    "WAVE 3 - YELL",
                    "An intense and powerful vocal performance designed to intimidate rival teams and boost team morale.",
                    &[
                        "Duration: Minimum of 1 minute",
                        "Focus on volume, projection, and intensity",
                        "Must remain respectful (no offensive language or gestures)",
                        "May include brief team slogans or cheers",
                    ],
                    vec![
                        criterion("Intensity & Energy", "Strength and enthusiasm in vocal performance", 30.0),
                        criterion("Unity & Vocal Power", "Harmony, coordination, and equal participation", 30.0),
                        criterion("Message & Delivery", "Clarity and effectiveness of the yell's message", 20.0),
                        criterion("Stage Presence & Confidence", "Body language, expression, and command of space", 20.0),
                    ],
                ),
            ]),
        },
    );

    let cheer_dance = EventDefinition::new(
        4,
        EventFields {
            category: "CIT Quest".to_string(),
            name: "Cheer Dance".to_string(),
            officer: "Yesha".to_string(),
            participants: "10-15".to_string(),
            judges: Arc::new(Vec::new()),
            description: Some("A dynamic performance blending dance and cheerleading elements.".to_string()),
            details: Arc::new(vec![Arc::new(GuidelineSection {
                title: "Mechanics".to_string(),
                description: None,
                guidelines: Some(strings(&[
                    "Each unit shall have one (1) entry with 10-15 performers (mixed gender).",
                    "The routine must incorporate dance techniques, formations, and group stunts/pyramids.",
                    "The team can make use of their own song choice as music.",
                    "The performance must not exceed 5 minutes, including entrance and exit.",
                    "The use of props (e.g., pompoms, flags, banners) is allowed with extra safety precautions.",
                ])),
                criteria: Some(Arc::new(vec![
                    criterion("Choreography (Creativity & Artistry)", "Originality, creativity, complexity, transitions, and overall composition.", 50.0),
                    criterion("Execution & Energy", "Precision, synchronization, consistency, enthusiasm, and stage presence.", 30.0),
                    criterion("Costume & Visuals", "Appropriateness, design, and appeal of costumes and props.", 10.0),
                    criterion("Overall Impact", "Crowd appeal, confidence, and how well all elements come together.", 10.0),
                ])),
                competition_points: Some(1500.0),
            })]),
        },
    );

    vec![
        joker_flag,
        cheer_dance,
        listing(5, "CIT Quest", "Banner Competition", "Yesha", "1"),
        listing(6, "CIT Quest", "Cosplay", "Yesha", "1"),
        listing(7, "CIT Quest", "Amazing Race", "Yesha", "ALL"),
        listing(8, "CIT Quest", "Larong Lahi", "Yesha", "Varies"),
        listing(11, "CIT Quest", "General Quiz", "Yesha", "All"),
        listing(31, "Pixel Play", "Solo and Duet Singing", "Sean", "1-2"),
        listing(12, "Mindscape", "Essay Writing (Filipino)", "Lryn", "1"),
        listing(13, "Mindscape", "Essay Writing (English)", "Lryn", "1"),
        listing(14, "Mindscape", "Debate", "Lryn", "3"),
        listing(19, "Hoop & Spike", "Basketball", "Joshua & Jericho", "12 Men | 5 Women"),
        listing(23, "Cipher Matrix", "Programming", "Lorenz", "4 (1st-4th year)"),
        listing(37, "Table Masters", "Chess", "Jeverlyn", "1 male | 1 female"),
    ]
}

fn house_rules(title: &str, rules: &[&str]) -> HouseRuleSection {
    HouseRuleSection {
        title: title.to_string(),
        rules: strings(rules),
    }
}

fn rules() -> RulesDocument {
    RulesDocument {
        title: MAIN_SERIES.to_string(),
        subtitle: "CIT Tech and Sports Fest 2025".to_string(),
        sdgs: strings(&["#SDG9", "#SDG13", "#SDG17"]),
        objectives: strings(&[
            "To showcase the diverse talents and skills of information technology students and faculty, fostering a sense of community and camaraderie.",
            "To promote sportsmanship, healthy competition, and community spirit among students, faculty, and the wider IT community.",
        ]),
        house_rules: vec![
            house_rules("Attendance and Participation", &[
                "All students are required to participate in the events assigned to their units. Attendance is mandatory and will be strictly monitored.",
                "While the event includes competitions, its primary goal is to promote unity and cooperation among all students.",
                "Double entries in solo events are not allowed, except in team events or where players are limited.",
            ]),
            house_rules("Responsibilities of Unit Advisers and Leaders", &[
                "Unit advisers and leaders must ensure that all members are actively involved in the events.",
                "Students are expected to maintain discipline throughout the event.",
            ]),
            house_rules("Demerit System", &[
                "A demerit system will be implemented for any rule violations. Deductions will be made from the unit's overall score.",
                "The current point standings will be displayed publicly to promote accountability and awareness.",
            ]),
            house_rules("Complaint and Grievance Procedure", &[
                "All complaints must be submitted to the Grievance Committee at least 3 hours before the event.",
                "The Committee's decision is final.",
                "Misconduct, cheating, or disrespect toward officials will result in disqualification.",
            ]),
            house_rules("Forfeits and Unsportsmanlike Behavior", &[
                "A unit that refuses to play or walks out automatically forfeits the event.",
                "Any unsportsmanlike behavior will result in the disqualification of the player.",
                "A second violation will cause the player to be barred from future events.",
            ]),
        ],
        demerit_deductions: vec![
            deduction("Abrupt back-out, refusal to play, or walkout", "0 points per event"),
            deduction("Unsportsmanlike behavior", "-25 points per incident"),
            deduction("Spying on another team (intentional)", "-500 points"),
            deduction("Spying on another team (unintentional/warning)", "-100 points"),
        ],
        scoring: ScoringRules {
            base_points: vec![
                BasePoints { kind: "Solo Events".to_string(), points: "1,000".to_string() },
                BasePoints { kind: "Duo-4 Member Events".to_string(), points: "1,200".to_string() },
                BasePoints { kind: "5-Member or Team Events".to_string(), points: "1,500".to_string() },
            ],
            placement: vec![
                PlacementPoints { place: "1st Place".to_string(), points: "100% (Full points)".to_string() },
                PlacementPoints { place: "2nd Place".to_string(), points: "80% of 1st Place".to_string() },
                PlacementPoints { place: "3rd Place".to_string(), points: "80% of 2nd Place".to_string() },
                PlacementPoints { place: "4th Place".to_string(), points: "80% of 3rd Place".to_string() },
            ],
            merit_points: vec![
                MeritPoints { category: "Attendance (1st/2nd/3rd/4th)".to_string(), points: "500/400/300/200 pts".to_string() },
                MeritPoints { category: "Outstanding Sportsmanship".to_string(), points: "50 pts".to_string() },
                MeritPoints { category: "Discipline and Cooperation".to_string(), points: "50 pts".to_string() },
                MeritPoints {
                    category: "Highest Participating Members (1st/2nd/3rd/4th)".to_string(),
                    points: "1,000/900/800/700 pts".to_string(),
                },
            ],
        },
        team_formation: TeamFormation {
            leaders: vec![
                leader("Unit Leader", 1, "Leads and manages the entire unit and reports directly to the S-ALT Officers."),
                leader("Unit Secretary", 1, "Records meeting notes, tracks attendance, manages documents, and keeps members informed."),
                leader("Unit Treasurer", 1, "Handles all financial matters of the unit and reports expenses to the leader."),
                leader("Operational Errands", 4, "Provides manpower and logistical support to the leader, secretary, and treasurer."),
            ],
            advisers: "The teams will vote for their own advisers from the faculty. Teams may treat their adviser as a coach, mentor, motivator, or guide during the event.".to_string(),
            naming: TeamNaming {
                description: "The teams will be assigned a team color and will decide what name they will create to complete their signature team name.".to_string(),
                teams: vec![
                    TeamColor { name: "Spades".to_string(), color: "Black".to_string() },
                    TeamColor { name: "Clubs".to_string(), color: "Green".to_string() },
                    TeamColor { name: "Hearts".to_string(), color: "Red".to_string() },
                    TeamColor { name: "Diamonds".to_string(), color: "Blue".to_string() },
                ],
                format: "Team Color + Team name. E.g., AMARANTH JOKER".to_string(),
            },
        },
    }
}

fn deduction(offense: &str, deduction: &str) -> DemeritDeduction {
    DemeritDeduction {
        offense: offense.to_string(),
        deduction: deduction.to_string(),
    }
}

fn leader(position: &str, count: u32, description: &str) -> LeaderRole {
    LeaderRole {
        position: position.to_string(),
        count,
        description: description.to_string(),
    }
}
