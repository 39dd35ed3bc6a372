use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Event, HtmlElement};

use super::dom;
use crate::error::PageError;
use crate::player::{Player, PlayerView, Track, TrackMark};

struct PlayerUi {
    title: HtmlElement,
    status: HtmlElement,
    time: HtmlElement,
    progress: HtmlElement,
    play_button: HtmlElement,
    tracks: Vec<HtmlElement>,
}

impl PlayerUi {
    fn render(&self, view: &PlayerView) {
        self.title.set_text_content(Some(&view.title));
        self.status.set_text_content(Some(view.status));
        self.time.set_text_content(Some(&view.time));
        self.play_button.set_text_content(Some(view.play_label));
        if let Err(e) = self
            .progress
            .style()
            .set_property("width", &format!("{}%", view.progress_percent))
        {
            log::warn!("progress bar not updated: {e:?}");
        }
        for (el, mark) in self.tracks.iter().zip(&view.marks) {
            let classes = el.class_list();
            classes.remove_2("active", "playing").ok();
            match mark {
                TrackMark::Active => classes.add_1("active").ok(),
                TrackMark::Playing => classes.add_1("playing").ok(),
                TrackMark::None => None,
            };
        }
    }
}

pub struct PlayerBinding {
    player: RefCell<Player>,
    ui: PlayerUi,
}

impl PlayerBinding {
    pub fn track_count(&self) -> usize {
        self.player.borrow().tracks().len()
    }

    /// Apply a transport action at the current page time and redraw.
    fn act(&self, action: impl FnOnce(&mut Player, u64)) {
        let view = {
            let mut player = self.player.borrow_mut();
            action(&mut player, dom::now());
            player.view()
        };
        self.ui.render(&view);
    }

    /// Run due simulated seconds; redraws only when time moved.
    pub fn tick(&self, now: u64) {
        let view = {
            let mut player = self.player.borrow_mut();
            if !player.advance_to(now) {
                return;
            }
            player.view()
        };
        self.ui.render(&view);
    }
}

fn read_track(index: usize, el: &HtmlElement) -> Result<Track, PageError> {
    let duration = el
        .get_attribute("data-duration")
        .ok_or(PageError::MissingElement(".track[data-duration]"))?;
    let name = el
        .get_attribute("data-name")
        .or_else(|| el.text_content().map(|t| t.trim().to_string()))
        .unwrap_or_default();
    Track::parse(index, name, &duration)
}

pub fn bind(doc: &Document) -> Result<Rc<PlayerBinding>, PageError> {
    let track_els: Vec<HtmlElement> = dom::query_all(doc, ".track")?;
    let tracks = track_els
        .iter()
        .enumerate()
        .map(|(i, el)| read_track(i, el))
        .collect::<Result<Vec<_>, _>>()?;

    let binding = Rc::new(PlayerBinding {
        player: RefCell::new(Player::new(tracks)),
        ui: PlayerUi {
            title: dom::query(doc, ".player-title")?,
            status: dom::query(doc, ".player-status")?,
            time: dom::query(doc, ".player-time")?,
            progress: dom::query(doc, ".player-progress-bar")?,
            play_button: dom::by_id(doc, "play")?,
            tracks: track_els,
        },
    });

    let controls: [(&'static str, fn(&mut Player, u64)); 4] = [
        ("play", Player::toggle),
        ("stop", |p, _| p.stop()),
        ("next", Player::next),
        ("prev", Player::prev),
    ];
    for (id, action) in controls {
        let button: HtmlElement = dom::by_id(doc, id)?;
        let b = binding.clone();
        dom::on(&button, "click", move |_: Event| b.act(action))?;
    }

    for (i, el) in binding.ui.tracks.iter().enumerate() {
        let b = binding.clone();
        dom::on(el, "click", move |_: Event| b.act(|p, now| p.pick(i, now)))?;
    }

    binding.ui.render(&binding.player.borrow().view());
    Ok(binding)
}
