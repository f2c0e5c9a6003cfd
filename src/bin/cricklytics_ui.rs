//! Cricklytics - Graphical dashboard
//!
//! Provides a tabbed interface over the ball-by-ball dataset: shot
//! effectiveness, bowling line/length insights, batsman strengths and
//! weaknesses, toss impact, and per-phase player profiles.
//!
//! The dataset is loaded once at startup (downloaded and extracted if not
//! cached) and held as shared immutable state; every filter interaction
//! recomputes the active view in full against it.

use cricklytics::analysis::search_names;
use cricklytics::dataset::{self, Column, Dataset};
use cricklytics::pipeline::{
    self, BatsmanSwotConfig, BattingProfileConfig, BowlingProfileConfig, LineLengthConfig,
    ShotEffectivenessConfig, TossImpactConfig,
};
use iced::widget::{
    button, checkbox, column, container, pick_list, row, rule, scrollable, text, text_input,
};
use iced::{Center, Element, Fill, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::new, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run()
}

// ============================================================================
// App State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TabId {
    Home,
    Shots,
    LineLength,
    Swot,
    Toss,
    BattingProfile,
    BowlingProfile,
}

struct App {
    active_tab: TabId,

    // Dataset (shared, immutable once loaded)
    dataset: Option<Arc<Dataset>>,
    load_status: String,
    load_failed: bool,

    // Selector option lists, computed once when the dataset arrives
    grounds: Vec<String>,
    bowl_kinds: Vec<String>,
    bowl_styles: Vec<String>,
    bat_hands: Vec<String>,
    toss_teams: Vec<String>,
    batsmen: Vec<String>,
    profile_batsmen: Vec<String>,
    profile_bowlers: Vec<String>,

    // Best Shots by Ground tab
    shots_ground: Option<String>,
    shots_kinds_on: bool,
    shots_kinds: Vec<String>,
    shots_styles_on: bool,
    shots_styles: Vec<String>,
    shots_hands_on: bool,
    shots_hands: Vec<String>,
    shots_result: String,

    // Line and Length tab
    ll_grounds: Vec<String>,
    ll_kinds_on: bool,
    ll_kinds: Vec<String>,
    ll_styles_on: bool,
    ll_styles: Vec<String>,
    ll_hands_on: bool,
    ll_hands: Vec<String>,
    ll_result: String,

    // Batsman SWOT tab
    swot_search: String,
    swot_batsman: Option<String>,
    swot_kinds_on: bool,
    swot_kinds: Vec<String>,
    swot_styles_on: bool,
    swot_styles: Vec<String>,
    swot_result: String,

    // Toss Impact tab
    toss_ground: Option<String>,
    toss_team_on: bool,
    toss_team: Option<String>,
    toss_kinds: Vec<String>,
    toss_styles_on: bool,
    toss_styles: Vec<String>,
    toss_result: String,

    // Batting Profile tab
    batp_search: String,
    batp_batsman: Option<String>,
    batp_grounds_on: bool,
    batp_grounds: Vec<String>,
    batp_kinds_on: bool,
    batp_kinds: Vec<String>,
    batp_styles_on: bool,
    batp_styles: Vec<String>,
    batp_result: String,

    // Bowling Profile tab
    bowlp_search: String,
    bowlp_bowler: Option<String>,
    bowlp_ground_on: bool,
    bowlp_ground: Option<String>,
    bowlp_hand_on: bool,
    bowlp_hand: Option<String>,
    bowlp_result: String,
}

impl App {
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn new() -> (Self, Task<Message>) {
        let override_path = std::env::var_os("CRICKLYTICS_DATA").map(PathBuf::from);
        let app = App {
            active_tab: TabId::Home,
            dataset: None,
            load_status: "Loading dataset...".to_string(),
            load_failed: false,
            grounds: Vec::new(),
            bowl_kinds: Vec::new(),
            bowl_styles: Vec::new(),
            bat_hands: Vec::new(),
            toss_teams: Vec::new(),
            batsmen: Vec::new(),
            profile_batsmen: Vec::new(),
            profile_bowlers: Vec::new(),
            shots_ground: None,
            shots_kinds_on: false,
            shots_kinds: Vec::new(),
            shots_styles_on: false,
            shots_styles: Vec::new(),
            shots_hands_on: false,
            shots_hands: Vec::new(),
            shots_result: String::new(),
            ll_grounds: Vec::new(),
            ll_kinds_on: false,
            ll_kinds: Vec::new(),
            ll_styles_on: false,
            ll_styles: Vec::new(),
            ll_hands_on: false,
            ll_hands: Vec::new(),
            ll_result: String::new(),
            swot_search: String::new(),
            swot_batsman: None,
            swot_kinds_on: false,
            swot_kinds: Vec::new(),
            swot_styles_on: false,
            swot_styles: Vec::new(),
            swot_result: String::new(),
            toss_ground: None,
            toss_team_on: false,
            toss_team: None,
            toss_kinds: Vec::new(),
            toss_styles_on: false,
            toss_styles: Vec::new(),
            toss_result: String::new(),
            batp_search: String::new(),
            batp_batsman: None,
            batp_grounds_on: false,
            batp_grounds: Vec::new(),
            batp_kinds_on: false,
            batp_kinds: Vec::new(),
            batp_styles_on: false,
            batp_styles: Vec::new(),
            batp_result: String::new(),
            bowlp_search: String::new(),
            bowlp_bowler: None,
            bowlp_ground_on: false,
            bowlp_ground: None,
            bowlp_hand_on: false,
            bowlp_hand: None,
            bowlp_result: String::new(),
        };
        (app, Task::run(load_dataset_stream(override_path), |msg| msg))
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    // Tab navigation
    TabSelected(TabId),

    // Dataset loading
    LoadProgress(String),
    LoadFinished(Result<Arc<Dataset>, String>),
    BrowseDataset,
    DatasetFileSelected(Option<PathBuf>),

    // Best Shots by Ground
    ShotsGroundSelected(String),
    ShotsKindsToggled(bool),
    ShotsKindValue(String, bool),
    ShotsStylesToggled(bool),
    ShotsStyleValue(String, bool),
    ShotsHandsToggled(bool),
    ShotsHandValue(String, bool),

    // Line and Length
    LlGroundValue(String, bool),
    LlKindsToggled(bool),
    LlKindValue(String, bool),
    LlStylesToggled(bool),
    LlStyleValue(String, bool),
    LlHandsToggled(bool),
    LlHandValue(String, bool),

    // Batsman SWOT
    SwotSearchChanged(String),
    SwotBatsmanSelected(String),
    SwotKindsToggled(bool),
    SwotKindValue(String, bool),
    SwotStylesToggled(bool),
    SwotStyleValue(String, bool),

    // Toss Impact
    TossGroundSelected(String),
    TossTeamToggled(bool),
    TossTeamSelected(String),
    TossKindValue(String, bool),
    TossStylesToggled(bool),
    TossStyleValue(String, bool),

    // Batting Profile
    BatProfSearchChanged(String),
    BatProfSelected(String),
    BatProfGroundsToggled(bool),
    BatProfGroundValue(String, bool),
    BatProfKindsToggled(bool),
    BatProfKindValue(String, bool),
    BatProfStylesToggled(bool),
    BatProfStyleValue(String, bool),

    // Bowling Profile
    BowlProfSearchChanged(String),
    BowlProfSelected(String),
    BowlProfGroundToggled(bool),
    BowlProfGroundSelected(String),
    BowlProfHandToggled(bool),
    BowlProfHandSelected(String),
}

// ============================================================================
// Update
// ============================================================================

impl App {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                Task::none()
            }

            // -- Dataset loading --
            Message::LoadProgress(status) => {
                self.load_status = status;
                Task::none()
            }
            Message::LoadFinished(result) => {
                match result {
                    Ok(ds) => {
                        self.grounds = ds.unique_values(Column::Ground);
                        self.bowl_kinds = ds.unique_values(Column::BowlKind);
                        self.bowl_styles = ds.unique_values(Column::BowlStyle);
                        self.bat_hands = ds.unique_values(Column::BatHand);
                        self.toss_teams = ds.unique_values(Column::Toss);
                        self.batsmen = ds.unique_values(Column::Bat);
                        self.profile_batsmen = pipeline::eligible_batsmen(&ds);
                        self.profile_bowlers = pipeline::eligible_bowlers(&ds);
                        self.load_status = format!("{} deliveries loaded", ds.len());
                        self.load_failed = false;
                        self.dataset = Some(ds);
                        self.recompute_all();
                    }
                    Err(e) => {
                        // Fatal: analysis tabs stay disabled rather than run
                        // against a partial dataset
                        self.load_failed = true;
                        self.load_status = format!("Dataset load failed: {}", e);
                        log::error!("{}", self.load_status);
                    }
                }
                Task::none()
            }
            Message::BrowseDataset => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .set_title("Select ball-by-ball dataset CSV")
                        .pick_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::DatasetFileSelected,
            ),
            Message::DatasetFileSelected(path) => {
                if let Some(p) = path {
                    self.dataset = None;
                    self.load_failed = false;
                    self.load_status = format!("Loading {}...", p.display());
                    self.reset_selections();
                    return Task::run(load_dataset_stream(Some(p)), |msg| msg);
                }
                Task::none()
            }

            // -- Best Shots by Ground --
            Message::ShotsGroundSelected(ground) => {
                self.shots_ground = Some(ground);
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsKindsToggled(on) => {
                self.shots_kinds_on = on;
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsKindValue(value, checked) => {
                toggle_value(&mut self.shots_kinds, value, checked);
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsStylesToggled(on) => {
                self.shots_styles_on = on;
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsStyleValue(value, checked) => {
                toggle_value(&mut self.shots_styles, value, checked);
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsHandsToggled(on) => {
                self.shots_hands_on = on;
                self.recompute_shots();
                Task::none()
            }
            Message::ShotsHandValue(value, checked) => {
                toggle_value(&mut self.shots_hands, value, checked);
                self.recompute_shots();
                Task::none()
            }

            // -- Line and Length --
            Message::LlGroundValue(value, checked) => {
                toggle_value(&mut self.ll_grounds, value, checked);
                self.recompute_line_length();
                Task::none()
            }
            Message::LlKindsToggled(on) => {
                self.ll_kinds_on = on;
                self.recompute_line_length();
                Task::none()
            }
            Message::LlKindValue(value, checked) => {
                toggle_value(&mut self.ll_kinds, value, checked);
                self.recompute_line_length();
                Task::none()
            }
            Message::LlStylesToggled(on) => {
                self.ll_styles_on = on;
                self.recompute_line_length();
                Task::none()
            }
            Message::LlStyleValue(value, checked) => {
                toggle_value(&mut self.ll_styles, value, checked);
                self.recompute_line_length();
                Task::none()
            }
            Message::LlHandsToggled(on) => {
                self.ll_hands_on = on;
                self.recompute_line_length();
                Task::none()
            }
            Message::LlHandValue(value, checked) => {
                toggle_value(&mut self.ll_hands, value, checked);
                self.recompute_line_length();
                Task::none()
            }

            // -- Batsman SWOT --
            Message::SwotSearchChanged(term) => {
                self.swot_search = term;
                Task::none()
            }
            Message::SwotBatsmanSelected(batsman) => {
                self.swot_batsman = Some(batsman);
                self.recompute_swot();
                Task::none()
            }
            Message::SwotKindsToggled(on) => {
                self.swot_kinds_on = on;
                self.recompute_swot();
                Task::none()
            }
            Message::SwotKindValue(value, checked) => {
                toggle_value(&mut self.swot_kinds, value, checked);
                self.recompute_swot();
                Task::none()
            }
            Message::SwotStylesToggled(on) => {
                self.swot_styles_on = on;
                self.recompute_swot();
                Task::none()
            }
            Message::SwotStyleValue(value, checked) => {
                toggle_value(&mut self.swot_styles, value, checked);
                self.recompute_swot();
                Task::none()
            }

            // -- Toss Impact --
            Message::TossGroundSelected(ground) => {
                self.toss_ground = Some(ground);
                self.recompute_toss();
                Task::none()
            }
            Message::TossTeamToggled(on) => {
                self.toss_team_on = on;
                self.recompute_toss();
                Task::none()
            }
            Message::TossTeamSelected(team) => {
                self.toss_team = Some(team);
                self.recompute_toss();
                Task::none()
            }
            Message::TossKindValue(value, checked) => {
                toggle_value(&mut self.toss_kinds, value, checked);
                self.recompute_toss();
                Task::none()
            }
            Message::TossStylesToggled(on) => {
                self.toss_styles_on = on;
                self.recompute_toss();
                Task::none()
            }
            Message::TossStyleValue(value, checked) => {
                toggle_value(&mut self.toss_styles, value, checked);
                self.recompute_toss();
                Task::none()
            }

            // -- Batting Profile --
            Message::BatProfSearchChanged(term) => {
                self.batp_search = term;
                Task::none()
            }
            Message::BatProfSelected(batsman) => {
                self.batp_batsman = Some(batsman);
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfGroundsToggled(on) => {
                self.batp_grounds_on = on;
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfGroundValue(value, checked) => {
                toggle_value(&mut self.batp_grounds, value, checked);
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfKindsToggled(on) => {
                self.batp_kinds_on = on;
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfKindValue(value, checked) => {
                toggle_value(&mut self.batp_kinds, value, checked);
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfStylesToggled(on) => {
                self.batp_styles_on = on;
                self.recompute_batting_profile();
                Task::none()
            }
            Message::BatProfStyleValue(value, checked) => {
                toggle_value(&mut self.batp_styles, value, checked);
                self.recompute_batting_profile();
                Task::none()
            }

            // -- Bowling Profile --
            Message::BowlProfSearchChanged(term) => {
                self.bowlp_search = term;
                Task::none()
            }
            Message::BowlProfSelected(bowler) => {
                self.bowlp_bowler = Some(bowler);
                self.recompute_bowling_profile();
                Task::none()
            }
            Message::BowlProfGroundToggled(on) => {
                self.bowlp_ground_on = on;
                self.recompute_bowling_profile();
                Task::none()
            }
            Message::BowlProfGroundSelected(ground) => {
                self.bowlp_ground = Some(ground);
                self.recompute_bowling_profile();
                Task::none()
            }
            Message::BowlProfHandToggled(on) => {
                self.bowlp_hand_on = on;
                self.recompute_bowling_profile();
                Task::none()
            }
            Message::BowlProfHandSelected(hand) => {
                self.bowlp_hand = Some(hand);
                self.recompute_bowling_profile();
                Task::none()
            }
        }
    }

    fn reset_selections(&mut self) {
        self.shots_ground = None;
        self.shots_result.clear();
        self.ll_result.clear();
        self.swot_batsman = None;
        self.swot_result.clear();
        self.toss_ground = None;
        self.toss_team = None;
        self.toss_result.clear();
        self.batp_batsman = None;
        self.batp_result.clear();
        self.bowlp_bowler = None;
        self.bowlp_ground = None;
        self.bowlp_hand = None;
        self.bowlp_result.clear();
    }

    fn recompute_all(&mut self) {
        self.recompute_shots();
        self.recompute_line_length();
        self.recompute_swot();
        self.recompute_toss();
        self.recompute_batting_profile();
        self.recompute_bowling_profile();
    }

    fn recompute_shots(&mut self) {
        let (Some(ds), Some(ground)) = (&self.dataset, &self.shots_ground) else {
            self.shots_result.clear();
            return;
        };
        let config = ShotEffectivenessConfig {
            ground: ground.clone(),
            bowl_kinds: toggled_selection(self.shots_kinds_on, &self.shots_kinds),
            bowl_styles: toggled_selection(self.shots_styles_on, &self.shots_styles),
            bat_hands: toggled_selection(self.shots_hands_on, &self.shots_hands),
        };
        self.shots_result = render(pipeline::shot_effectiveness(ds, &config));
    }

    fn recompute_line_length(&mut self) {
        let Some(ds) = &self.dataset else {
            self.ll_result.clear();
            return;
        };
        let config = LineLengthConfig {
            grounds: self.ll_grounds.clone(),
            bowl_kinds: toggled_selection(self.ll_kinds_on, &self.ll_kinds),
            bowl_styles: toggled_selection(self.ll_styles_on, &self.ll_styles),
            bat_hands: toggled_selection(self.ll_hands_on, &self.ll_hands),
        };
        self.ll_result = render(pipeline::line_length_insights(ds, &config));
    }

    fn recompute_swot(&mut self) {
        let (Some(ds), Some(batsman)) = (&self.dataset, &self.swot_batsman) else {
            self.swot_result.clear();
            return;
        };
        let config = BatsmanSwotConfig {
            batsman: batsman.clone(),
            bowl_kinds: toggled_selection(self.swot_kinds_on, &self.swot_kinds),
            bowl_styles: toggled_selection(self.swot_styles_on, &self.swot_styles),
        };
        self.swot_result = render(pipeline::batsman_swot(ds, &config));
    }

    fn recompute_toss(&mut self) {
        let (Some(ds), Some(ground)) = (&self.dataset, &self.toss_ground) else {
            self.toss_result.clear();
            return;
        };
        let toss_team = if self.toss_team_on {
            self.toss_team.clone()
        } else {
            None
        };
        let config = TossImpactConfig {
            ground: ground.clone(),
            toss_team,
            bowl_kinds: self.toss_kinds.clone(),
            bowl_styles: toggled_selection(self.toss_styles_on, &self.toss_styles),
        };
        self.toss_result = render(pipeline::toss_impact(ds, &config));
    }

    fn recompute_batting_profile(&mut self) {
        let (Some(ds), Some(batsman)) = (&self.dataset, &self.batp_batsman) else {
            self.batp_result.clear();
            return;
        };
        let config = BattingProfileConfig {
            batsman: batsman.clone(),
            grounds: toggled_selection(self.batp_grounds_on, &self.batp_grounds),
            bowl_kinds: toggled_selection(self.batp_kinds_on, &self.batp_kinds),
            bowl_styles: toggled_selection(self.batp_styles_on, &self.batp_styles),
        };
        self.batp_result = render(pipeline::batting_profile(ds, &config));
    }

    fn recompute_bowling_profile(&mut self) {
        let (Some(ds), Some(bowler)) = (&self.dataset, &self.bowlp_bowler) else {
            self.bowlp_result.clear();
            return;
        };
        let ground = if self.bowlp_ground_on {
            self.bowlp_ground.clone()
        } else {
            None
        };
        let bat_hand = if self.bowlp_hand_on {
            self.bowlp_hand.clone()
        } else {
            None
        };
        let config = BowlingProfileConfig {
            bowler: bowler.clone(),
            ground,
            bat_hand,
        };
        self.bowlp_result = render(pipeline::bowling_profile(ds, &config));
    }
}

// ============================================================================
// View
// ============================================================================

impl App {
    fn view(&self) -> Element<'_, Message> {
        let tab_bar = row![
            tab_button("Home", TabId::Home, self.active_tab),
            tab_button("Best Shots", TabId::Shots, self.active_tab),
            tab_button("Line & Length", TabId::LineLength, self.active_tab),
            tab_button("Batsman SWOT", TabId::Swot, self.active_tab),
            tab_button("Toss Impact", TabId::Toss, self.active_tab),
            tab_button("Batting Profiles", TabId::BattingProfile, self.active_tab),
            tab_button("Bowling Profiles", TabId::BowlingProfile, self.active_tab),
        ]
        .spacing(4);

        let content: Element<'_, Message> = match self.active_tab {
            TabId::Home => self.view_home_tab(),
            TabId::Shots => self.view_shots_tab(),
            TabId::LineLength => self.view_line_length_tab(),
            TabId::Swot => self.view_swot_tab(),
            TabId::Toss => self.view_toss_tab(),
            TabId::BattingProfile => self.view_batting_profile_tab(),
            TabId::BowlingProfile => self.view_bowling_profile_tab(),
        };

        let body = container(content).padding(20).width(Fill).height(Fill);

        column![
            container(tab_bar).padding([10, 20]),
            rule::horizontal(1),
            body,
        ]
        .into()
    }

    // -- Home tab --
    fn view_home_tab(&self) -> Element<'_, Message> {
        let title = text("Cricklytics").size(28);
        let subtitle = text("Ball-by-ball cricket analytics dashboard").size(14);

        let status_color = if self.load_failed {
            iced::Color::from_rgb(0.9, 0.4, 0.4)
        } else if self.dataset.is_some() {
            iced::Color::from_rgb(0.4, 0.9, 0.4)
        } else {
            iced::Color::from_rgb(0.6, 0.6, 0.6)
        };
        let status_section = column![
            text("Dataset").size(16),
            text(&self.load_status).size(13).color(status_color),
            row![button(text("Open Local Dataset...").size(13)).on_press(Message::BrowseDataset)],
        ]
        .spacing(8);

        let analyses = column![
            rule::horizontal(1),
            text("Analyses:").size(16),
            text("  1. Best Shots by Ground - Average runs and dismissal rate per shot type").size(13),
            text("  2. Bowling Line and Length Insights - Average, economy, and strike rate").size(13),
            text("  3. Batsman Strengths and Weaknesses - Breakdown by line, length, and bowling").size(13),
            text("  4. Toss Impact on Match Results - Toss and batting-first win percentages").size(13),
            text("  5. Player Batting Profiles - Phase-wise scoring, boundary, and control rates").size(13),
            text("  6. Player Bowling Profiles - Phase-wise economy, average, and control rates").size(13),
        ]
        .spacing(6);

        column![title, subtitle, status_section, analyses]
            .spacing(16)
            .into()
    }

    // -- Best Shots by Ground tab --
    fn view_shots_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let filters = row![
            multi_filter(
                "Bowling Kind Filter",
                self.shots_kinds_on,
                &self.bowl_kinds,
                &self.shots_kinds,
                Message::ShotsKindsToggled,
                Message::ShotsKindValue,
            ),
            multi_filter(
                "Bowling Style Filter",
                self.shots_styles_on,
                &self.bowl_styles,
                &self.shots_styles,
                Message::ShotsStylesToggled,
                Message::ShotsStyleValue,
            ),
            multi_filter(
                "Bat Hand Filter",
                self.shots_hands_on,
                &self.bat_hands,
                &self.shots_hands,
                Message::ShotsHandsToggled,
                Message::ShotsHandValue,
            ),
        ]
        .spacing(24);

        column![
            text("Best Shots by Ground").size(20),
            row![
                text("Ground:").width(130),
                pick_list(
                    self.grounds.clone(),
                    self.shots_ground.clone(),
                    Message::ShotsGroundSelected,
                )
                .placeholder("Select ground")
                .width(320),
            ]
            .spacing(10)
            .align_y(Center),
            filters,
            rule::horizontal(1),
            result_pane(&self.shots_result, "Select a ground to run the analysis."),
        ]
        .spacing(12)
        .into()
    }

    // -- Line and Length tab --
    fn view_line_length_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let ground_section = column![
            text("Grounds (all when none selected)").size(14),
            value_checkboxes(&self.grounds, &self.ll_grounds, Message::LlGroundValue),
        ]
        .spacing(6);

        let filters = row![
            ground_section,
            multi_filter(
                "Bowling Kind Filter",
                self.ll_kinds_on,
                &self.bowl_kinds,
                &self.ll_kinds,
                Message::LlKindsToggled,
                Message::LlKindValue,
            ),
            multi_filter(
                "Bowling Style Filter",
                self.ll_styles_on,
                &self.bowl_styles,
                &self.ll_styles,
                Message::LlStylesToggled,
                Message::LlStyleValue,
            ),
            multi_filter(
                "Bat Hand Filter",
                self.ll_hands_on,
                &self.bat_hands,
                &self.ll_hands,
                Message::LlHandsToggled,
                Message::LlHandValue,
            ),
        ]
        .spacing(24);

        column![
            text("Bowling Line and Length Insights").size(20),
            filters,
            rule::horizontal(1),
            result_pane(&self.ll_result, "Computing..."),
        ]
        .spacing(12)
        .into()
    }

    // -- Batsman SWOT tab --
    fn view_swot_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let filters = row![
            multi_filter(
                "Bowling Kind Filter",
                self.swot_kinds_on,
                &self.bowl_kinds,
                &self.swot_kinds,
                Message::SwotKindsToggled,
                Message::SwotKindValue,
            ),
            multi_filter(
                "Bowling Style Filter",
                self.swot_styles_on,
                &self.bowl_styles,
                &self.swot_styles,
                Message::SwotStylesToggled,
                Message::SwotStyleValue,
            ),
        ]
        .spacing(24);

        column![
            text("Batsman Strengths and Weaknesses").size(20),
            player_picker(
                "Batsman",
                &self.swot_search,
                &self.batsmen,
                &self.swot_batsman,
                Message::SwotSearchChanged,
                Message::SwotBatsmanSelected,
            ),
            filters,
            rule::horizontal(1),
            result_pane(&self.swot_result, "Select a batsman to run the analysis."),
        ]
        .spacing(12)
        .into()
    }

    // -- Toss Impact tab --
    fn view_toss_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let kind_section = column![
            text("Bowling kinds (all when none selected)").size(14),
            value_checkboxes(&self.bowl_kinds, &self.toss_kinds, Message::TossKindValue),
        ]
        .spacing(6);

        let filters = row![
            single_filter(
                "Team Filter",
                self.toss_team_on,
                &self.toss_teams,
                &self.toss_team,
                Message::TossTeamToggled,
                Message::TossTeamSelected,
            ),
            kind_section,
            multi_filter(
                "Bowling Style Filter",
                self.toss_styles_on,
                &self.bowl_styles,
                &self.toss_styles,
                Message::TossStylesToggled,
                Message::TossStyleValue,
            ),
        ]
        .spacing(24);

        column![
            text("Toss Impact on Match Results").size(20),
            row![
                text("Ground:").width(130),
                pick_list(
                    self.grounds.clone(),
                    self.toss_ground.clone(),
                    Message::TossGroundSelected,
                )
                .placeholder("Select ground")
                .width(320),
            ]
            .spacing(10)
            .align_y(Center),
            filters,
            rule::horizontal(1),
            result_pane(&self.toss_result, "Select a ground to run the analysis."),
        ]
        .spacing(12)
        .into()
    }

    // -- Batting Profile tab --
    fn view_batting_profile_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let filters = row![
            multi_filter(
                "Ground Filter",
                self.batp_grounds_on,
                &self.grounds,
                &self.batp_grounds,
                Message::BatProfGroundsToggled,
                Message::BatProfGroundValue,
            ),
            multi_filter(
                "Bowling Kind Filter",
                self.batp_kinds_on,
                &self.bowl_kinds,
                &self.batp_kinds,
                Message::BatProfKindsToggled,
                Message::BatProfKindValue,
            ),
            multi_filter(
                "Bowling Style Filter",
                self.batp_styles_on,
                &self.bowl_styles,
                &self.batp_styles,
                Message::BatProfStylesToggled,
                Message::BatProfStyleValue,
            ),
        ]
        .spacing(24);

        column![
            text("Player Batting Profiles").size(20),
            text("Players with at least 300 deliveries faced.").size(13),
            player_picker(
                "Batsman",
                &self.batp_search,
                &self.profile_batsmen,
                &self.batp_batsman,
                Message::BatProfSearchChanged,
                Message::BatProfSelected,
            ),
            filters,
            rule::horizontal(1),
            result_pane(&self.batp_result, "Select a batsman to run the analysis."),
        ]
        .spacing(12)
        .into()
    }

    // -- Bowling Profile tab --
    fn view_bowling_profile_tab(&self) -> Element<'_, Message> {
        if self.dataset.is_none() {
            return self.view_unavailable();
        }

        let filters = row![
            single_filter(
                "Ground Filter",
                self.bowlp_ground_on,
                &self.grounds,
                &self.bowlp_ground,
                Message::BowlProfGroundToggled,
                Message::BowlProfGroundSelected,
            ),
            single_filter(
                "Batting Hand Filter",
                self.bowlp_hand_on,
                &self.bat_hands,
                &self.bowlp_hand,
                Message::BowlProfHandToggled,
                Message::BowlProfHandSelected,
            ),
        ]
        .spacing(24);

        column![
            text("Player Bowling Profiles").size(20),
            text("Players with at least 300 deliveries bowled.").size(13),
            player_picker(
                "Bowler",
                &self.bowlp_search,
                &self.profile_bowlers,
                &self.bowlp_bowler,
                Message::BowlProfSearchChanged,
                Message::BowlProfSelected,
            ),
            filters,
            rule::horizontal(1),
            result_pane(&self.bowlp_result, "Select a bowler to run the analysis."),
        ]
        .spacing(12)
        .into()
    }

    fn view_unavailable(&self) -> Element<'_, Message> {
        let heading = if self.load_failed {
            "Dataset failed to load"
        } else {
            "Loading dataset..."
        };
        column![
            text(heading).size(18),
            text(&self.load_status).size(13),
            text("Analyses are available once the dataset is loaded.").size(13),
        ]
        .spacing(10)
        .into()
    }
}

// ============================================================================
// Helper widgets
// ============================================================================

/// Render a tab button, styled differently when active.
fn tab_button(label: &str, tab: TabId, active: TabId) -> Element<'_, Message> {
    let btn = button(text(label).size(14));
    if tab == active {
        btn.style(button::primary).into()
    } else {
        btn.on_press(Message::TabSelected(tab))
            .style(button::secondary)
            .into()
    }
}

/// Scrollable list of per-value checkboxes for a multi-value selection.
fn value_checkboxes<'a>(
    options: &'a [String],
    selected: &'a [String],
    on_value: fn(String, bool) -> Message,
) -> Element<'a, Message> {
    let mut list = column![].spacing(2);
    for value in options {
        let value_owned = value.clone();
        list = list.push(
            checkbox(selected.contains(value))
                .label(value.as_str())
                .on_toggle(move |checked| on_value(value_owned.clone(), checked)),
        );
    }
    scrollable(list).height(140).into()
}

/// Activation checkbox plus a value list shown only while active.
fn multi_filter<'a>(
    label: &'a str,
    on: bool,
    options: &'a [String],
    selected: &'a [String],
    on_toggle: fn(bool) -> Message,
    on_value: fn(String, bool) -> Message,
) -> Element<'a, Message> {
    let mut section = column![checkbox(on).label(label).on_toggle(on_toggle)].spacing(6);
    if on {
        section = section.push(value_checkboxes(options, selected, on_value));
    }
    section.into()
}

/// Activation checkbox plus a single-value pick list shown only while active.
fn single_filter<'a>(
    label: &'a str,
    on: bool,
    options: &[String],
    selected: &Option<String>,
    on_toggle: fn(bool) -> Message,
    on_select: fn(String) -> Message,
) -> Element<'a, Message> {
    let mut section = column![checkbox(on).label(label).on_toggle(on_toggle)].spacing(6);
    if on {
        section = section.push(
            pick_list(options.to_vec(), selected.clone(), on_select)
                .placeholder("Select...")
                .width(240),
        );
    }
    section.into()
}

/// Substring search box plus a pick list over the matching names.
fn player_picker<'a>(
    label: &'a str,
    search: &'a str,
    names: &[String],
    selected: &Option<String>,
    on_search: fn(String) -> Message,
    on_select: fn(String) -> Message,
) -> Element<'a, Message> {
    let filtered = search_names(names, search);
    column![
        text(label).size(14),
        row![
            text_input("Type to search...", search)
                .on_input(on_search)
                .width(240),
            pick_list(filtered, selected.clone(), on_select)
                .placeholder("Select player")
                .width(320),
        ]
        .spacing(10)
        .align_y(Center),
    ]
    .spacing(6)
    .into()
}

/// Monospace result pane, or a dim hint while no primary selection exists.
fn result_pane<'a>(result: &'a str, hint: &'a str) -> Element<'a, Message> {
    if result.is_empty() {
        column![text(hint)
            .size(13)
            .color(iced::Color::from_rgb(0.6, 0.6, 0.6))]
        .into()
    } else {
        scrollable(container(text(result).size(12).font(iced::Font::MONOSPACE)).padding(8))
            .height(Fill)
            .into()
    }
}

// ============================================================================
// Recompute helpers and dataset loading
// ============================================================================

fn render(output: pipeline::ViewOutput) -> String {
    pipeline::render_blocks(&output.blocks).unwrap_or_else(|e| format!("Error: {}", e))
}

fn toggled_selection(on: bool, values: &[String]) -> Option<Vec<String>> {
    if on {
        Some(values.to_vec())
    } else {
        None
    }
}

fn toggle_value(selection: &mut Vec<String>, value: String, checked: bool) {
    if checked {
        if !selection.contains(&value) {
            selection.push(value);
        }
    } else {
        selection.retain(|v| v != &value);
    }
}

/// Load the dataset on a worker thread and stream progress updates to the UI.
///
/// Returns a stream of `Message` values: `LoadProgress` while downloading and
/// parsing, and a final `LoadFinished` with the dataset or the fatal error.
fn load_dataset_stream(override_path: Option<PathBuf>) -> impl futures::Stream<Item = Message> {
    let (tx, rx) = futures::channel::mpsc::unbounded();

    std::thread::spawn(move || {
        let progress = tx.clone();
        let result = (move || -> anyhow::Result<Dataset> {
            let csv_path = match override_path {
                Some(path) => path,
                None => {
                    let dest = PathBuf::from(dataset::DATA_DIR);
                    let cached = dest.join(dataset::DATA_FILE);
                    if cached.exists() {
                        cached
                    } else {
                        let _ = progress.unbounded_send(Message::LoadProgress(
                            "Downloading dataset archive...".to_string(),
                        ));
                        dataset::download_and_extract(dataset::DATA_URL, &dest)?
                    }
                }
            };
            let _ = progress.unbounded_send(Message::LoadProgress(format!(
                "Loading {}...",
                csv_path.display()
            )));
            Dataset::load(&csv_path)
        })();

        let _ = tx.unbounded_send(Message::LoadFinished(
            result.map(Arc::new).map_err(|e| format!("{:#}", e)),
        ));
    });

    rx
}
