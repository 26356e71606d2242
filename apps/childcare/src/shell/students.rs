//! Student management flows.

use super::{Workspace, choose, report_abort, submenu_title};
use crate::input::{
    InputError, LineSource, parse_birth_date, parse_email, parse_name, parse_phone,
    parse_student_id, parse_text, parse_yes_no, prompt_valid,
};
use crate::render;
use childcare_core::{
    AssignmentResult, GuardianInfo, StudentDetails, StudentId, StudentRecord, save_students,
};
use chrono::NaiveDate;
use colored::Colorize;

const STUDENT_OPTIONS: [&str; 5] = [
    "Add Student",
    "Delete Student",
    "List Students",
    "Display Parent/Guardian Details",
    "Save changes and return to Main Menu",
];

pub(super) fn menu(ws: &mut Workspace, input: &mut dyn LineSource) {
    let title = submenu_title("Student Management Menu");
    loop {
        match choose(input, &title, &STUDENT_OPTIONS) {
            1 => {
                println!("{}\n", "Adding Student".magenta().bold());
                if let Err(e) = add_student(ws, input) {
                    report_abort(&e);
                }
            }
            2 => {
                println!("{}\n", "Deleting Student".magenta().bold());
                match delete_student(ws, input) {
                    Ok(_) => {}
                    Err(InputError::NotAnInteger) => println!(
                        "{}",
                        "Invalid input. Please enter a valid student ID (integer).".red()
                    ),
                    Err(e) => report_abort(&e),
                }
            }
            3 => {
                println!("\n{}", "Students list".yellow());
                println!("{}", render::classrooms(&ws.roster, ws.today));
            }
            4 => println!("{}", render::guardians(&ws.roster)),
            _ => {
                save(ws);
                return;
            }
        }
    }
}

/// Write the student document, reporting the outcome.
pub fn save(ws: &Workspace) {
    match save_students(&ws.files.students, &ws.roster) {
        Ok(written) => {
            tracing::info!(
                path = %ws.files.students.display(),
                written,
                "Students saved"
            );
            println!("\n{}", "Student menu changes successfully saved".yellow());
        }
        Err(e) => {
            tracing::error!(path = %ws.files.students.display(), error = %e, "Saving students failed");
            println!("\n{}", format!("Could not save students: {}", e).red());
        }
    }
}

/// Prompt for a new student and enroll them.
///
/// The record is added even when no classroom accepts the student's age;
/// it then stays on the roster as a cleared placeholder. `None` when the
/// roster refused the enrollment.
pub fn add_student(
    ws: &mut Workspace,
    input: &mut dyn LineSource,
) -> Result<Option<(StudentId, AssignmentResult)>, InputError> {
    let details = read_student_details(input, ws.today)?;
    let (id, result) = match ws.roster.enroll(details.clone(), ws.today) {
        Ok(enrolled) => enrolled,
        Err(e) => {
            tracing::error!(error = %e, "Enrollment failed");
            println!("{}", format!("Could not add student: {}", e).red());
            return Ok(None);
        }
    };

    match &result {
        AssignmentResult::Assigned { band, age } => {
            tracing::info!(student_id = id.value(), band = %band, "Student enrolled");
            println!(
                "\n{}",
                format!(
                    "{} {} (Student ID: {}) is {} and is assigned to {}.",
                    details.first_name, details.last_name, id, age, band
                )
                .yellow()
            );
        }
        AssignmentResult::Unplaceable { age } => {
            tracing::info!(student_id = id.value(), "Student outside every age band");
            let age = age.map(|age| age.to_string()).unwrap_or_default();
            println!(
                "Student of age: {} cannot be added to any classroom due to age restriction. \
                 Therefore, they are not enrolled.",
                age
            );
        }
    }
    Ok(Some((id, result)))
}

/// Every answer of the add-student flow, in prompt order.
pub fn read_student_details(
    input: &mut dyn LineSource,
    today: NaiveDate,
) -> Result<StudentDetails, InputError> {
    let first_name = prompt_valid(input, "Enter student's first name: ", parse_name)?;
    let last_name = prompt_valid(input, "Enter student's last name: ", parse_name)?;
    let birth_date = prompt_valid(input, "Enter student's birthday (YYYY-MM-DD): ", |raw| {
        parse_birth_date(raw, today)
    })?;

    let mut allergies = Vec::new();
    let mut question = "Does the student have any allergies? (yes/no): ";
    while prompt_valid(input, question, parse_yes_no)? {
        allergies.push(prompt_valid(input, "Enter allergy: ", parse_text)?);
        question = "Does the student have any more allergies? (yes/no): ";
    }

    let guardian = GuardianInfo::new(
        prompt_valid(input, "Enter parent/guardian's first name: ", parse_name)?,
        prompt_valid(input, "Enter parent/guardian's last name: ", parse_name)?,
        prompt_valid(input, "Enter parent/guardian's contact number: ", parse_phone)?,
        prompt_valid(input, "Enter parent/guardian's contact email: ", parse_email)?,
    );

    Ok(StudentDetails::new(first_name, last_name, birth_date)
        .with_allergies(allergies)
        .with_guardian(guardian))
}

/// Prompt once for an id and delete that student.
///
/// `Ok(None)` means the id was not on the roster; an answer that is not an
/// integer comes back as [`InputError::NotAnInteger`] without re-prompting.
pub fn delete_student(
    ws: &mut Workspace,
    input: &mut dyn LineSource,
) -> Result<Option<StudentRecord>, InputError> {
    let raw = input.read_line("Enter the student ID to delete: ")?;
    let id = parse_student_id(&raw)?;

    match ws.roster.delete(id) {
        Ok(record) => {
            tracing::info!(student_id = id.value(), "Student deleted");
            let name = match record.full_name() {
                name if name.is_empty() => format!("Student {}", id),
                name => name,
            };
            if let Some(band) = record.assigned_band() {
                println!("\n{}", format!("{} removed from {}.", name, band).yellow());
            }
            println!(
                "{}",
                format!(
                    "{} (student ID: {}) has been deleted from the system.",
                    name, id
                )
                .yellow()
            );
            Ok(Some(record))
        }
        Err(e) => {
            tracing::debug!(student_id = id.value(), error = %e, "Delete target missing");
            println!("Student with ID {} not found.", id);
            Ok(None)
        }
    }
}
