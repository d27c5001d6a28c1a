use super::parse::{parse_ascension_history, parse_search_results};
use super::{GameSession, HistoryFetch, PlayerId, PlayerMatch, PlayerSearch};
use crate::ascension::RunRecord;
use crate::error::{FillSpreadError, Result};
use crate::util::check_response;
use log::debug;
use ureq::Agent;

const KOL_BASE_URL: &str = "https://www.kingdomofloathing.com";

/// A logged-in game session. The agent's cookie store carries the session
/// between requests.
pub struct KolSession {
    agent: Agent,
    base_url: String,
    logged_in: bool,
}

impl KolSession {
    pub fn new() -> KolSession {
        KolSession::with_base_url(KOL_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> KolSession {
        KolSession {
            agent: Agent::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            logged_in: false,
        }
    }

    fn url(&self, page: &str) -> String {
        format!("{}/{}", self.base_url, page)
    }

    fn get_page(&self, page: &str, query: &[(&str, &str)]) -> Result<String> {
        if !self.logged_in {
            return Err(FillSpreadError::Authentication {
                service: "kol",
                reason: "not logged in".to_string(),
            });
        }
        let mut req = self.agent.get(&self.url(page));
        for (k, v) in query {
            req.query(k, v);
        }
        let resp = check_response(req.call())?;
        Ok(resp.into_string()?)
    }
}

impl Default for KolSession {
    fn default() -> KolSession {
        KolSession::new()
    }
}

/// A successful login lands on the main frameset.
fn login_succeeded(final_url: &str, body: &str) -> bool {
    final_url.contains("main.php") || body.contains("name=mainpane")
}

impl GameSession for KolSession {
    fn login(&mut self, user: &str, passwd: &str) -> Result<()> {
        let resp = self.agent.post(&self.url("login.php")).send_form(&[
            ("loginname", user),
            ("password", passwd),
            ("secure", "0"),
            ("loggingin", "Yup."),
        ]);
        let resp = check_response(resp).map_err(|e| FillSpreadError::Authentication {
            service: "kol",
            reason: e.to_string(),
        })?;
        let final_url = resp.get_url().to_string();
        let body = resp.into_string()?;
        if !login_succeeded(&final_url, &body) {
            return Err(FillSpreadError::Authentication {
                service: "kol",
                reason: format!("login as {} was refused", user),
            });
        }
        self.logged_in = true;
        debug!("Logged in to KoL as {}", user);
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        if !self.logged_in {
            return Ok(());
        }
        self.get_page("logout.php", &[])?;
        self.logged_in = false;
        debug!("Logged out of KoL");
        Ok(())
    }
}

impl PlayerSearch for KolSession {
    fn search(&self, name: &str) -> Result<Vec<PlayerMatch>> {
        let page = self.get_page(
            "searchplayer.php",
            &[
                ("searching", "Yep."),
                ("searchstring", name),
                ("startswith", "1"),
                ("hardcoreonly", "0"),
            ],
        )?;
        parse_search_results(&page)
    }
}

impl HistoryFetch for KolSession {
    fn fetch(&self, user_id: PlayerId) -> Result<Vec<RunRecord>> {
        let who = user_id.to_string();
        let page = self.get_page(
            "ascensionhistory.php",
            &[("back", "other"), ("who", &who), ("prens13", "1")],
        )?;
        parse_ascension_history(&page)
    }
}
