// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::record::WorksheetRecord;
use worksheet_domain::FormMode;

/// The host's side of an open form.
///
/// The container calls these when the user saves, deletes or leaves the
/// form. Persistence and navigation are the host's business.
pub trait WorksheetSink {
    /// Receives an assembled record.
    fn submit_form(&mut self, record: &WorksheetRecord, mode: FormMode);

    /// Deletes the loaded worksheet.
    fn delete_data(&mut self);

    /// Dismisses the form.
    fn handle_form(&mut self);
}
