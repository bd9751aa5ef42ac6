//! Per-frame work for the shell.

use std::fmt::Write;
use std::time::Instant;

use tracing::trace;

use frostwm::display::DisplayRequest;

use crate::state::Shell;

impl Shell {
    /// Called each frame tick: runs due animation frames and idle commits.
    pub fn render_frame(&mut self, now: Instant) {
        self.render.dispatch(now);
        for request in self.display_log.borrow().iter() {
            match request {
                DisplayRequest::InputRegion(surface, region) => {
                    trace!(?surface, rects = ?region.rects(), "Display input region")
                }
                other => trace!(?other, "Display request"),
            }
        }
        let sent = self.drain_display_log();
        if sent > 0 {
            trace!(sent, "Display requests flushed");
        }
    }

    /// Human-readable snapshot of the render manager.
    pub fn dump(&self) -> String {
        let rm = &self.render;
        let mut out = String::new();
        let (radius, saturation, brightness, zoom) = rm.home_params();
        let _ = writeln!(
            out,
            "state {:?} (from {:?}), {} transitions, uptime {:?}",
            rm.state(),
            rm.previous_state(),
            rm.transition_count(),
            self.start_time.elapsed(),
        );
        let _ = writeln!(
            out,
            "effects {:?}{} radius={radius:.2} saturation={saturation:.2} brightness={brightness:.2} zoom={zoom:.2}",
            rm.blur_flags(),
            if rm.is_effect_running() { " (running)" } else { "" },
        );
        let _ = writeln!(
            out,
            "screen {:?}{}{}",
            rm.screen(),
            if rm.is_portrait() { " portrait" } else { "" },
            if rm.is_input_blocked() { " input-blocked" } else { "" },
        );
        match rm.committed_input_region() {
            Some(region) => {
                let _ = writeln!(out, "input {:?}", region.rects());
            }
            None => {
                let _ = writeln!(out, "input <never committed>");
            }
        }
        if rm.clients().is_empty() {
            let _ = writeln!(out, "no clients");
        } else {
            let _ = writeln!(out, "{} clients, top first:", rm.clients().len());
        }
        for client in rm.clients().top_down() {
            let _ = writeln!(
                out,
                "client {} {} {:?}{}{}{}",
                client.id,
                client.kind.name(),
                client.geometry,
                if client.maximized { " max" } else { "" },
                if client.modal_blocker { " modal" } else { "" },
                if client.unmap_pending { " leaving" } else { "" },
            );
        }
        out.push_str(&rm.scene().describe());
        out
    }
}
